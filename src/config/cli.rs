use crate::domain::ports::{ProgressSink, RandomSource};
use rand::Rng;

/// Default sink: progress lines go straight to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn emit(&self, line: &str) {
        println!("{}", line);
    }
}

/// Default random source backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}
