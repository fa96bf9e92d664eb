use std::sync::Mutex;
use std::time::{Duration, Instant};
use sysinfo::{Pid, RefreshKind, System};

#[derive(Debug, Clone)]
pub struct SystemStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

pub struct SystemMonitor {
    inner: Option<Mutex<MonitorState>>,
    start_time: Instant,
}

struct MonitorState {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let inner = if enabled {
            sysinfo::get_current_pid().ok().map(|pid| {
                let mut system = System::new_with_specifics(RefreshKind::everything());
                system.refresh_all();
                Mutex::new(MonitorState {
                    system,
                    pid,
                    peak_memory_mb: 0,
                })
            })
        } else {
            None
        };

        Self {
            inner,
            start_time: Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub fn get_stats(&self) -> Option<SystemStats> {
        let mut state = self.inner.as_ref()?.lock().ok()?;
        state.system.refresh_all();

        let pid = state.pid;
        let (cpu_usage, memory_mb) = {
            let process = state.system.process(pid)?;
            (process.cpu_usage(), process.memory() / 1024 / 1024)
        };

        if memory_mb > state.peak_memory_mb {
            state.peak_memory_mb = memory_mb;
        }

        Some(SystemStats {
            cpu_usage,
            memory_usage_mb: memory_mb,
            peak_memory_mb: state.peak_memory_mb,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_reports_nothing() {
        let monitor = SystemMonitor::new(false);

        assert!(!monitor.is_enabled());
        assert!(monitor.get_stats().is_none());
        // must not panic with nothing to sample
        monitor.log_stats("Extract");
        monitor.log_final_stats();
    }
}
