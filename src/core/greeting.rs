use crate::domain::ports::ProgressSink;

pub const GREETING: &str = "Hello Global Logic!";

pub fn hello(sink: &dyn ProgressSink) {
    sink.emit(GREETING);
}
