// src/pipeline.rs
pub mod config;
pub mod context;
pub mod filter;
pub mod sinks;
pub mod stream;

pub use config::{ErrorStrategy, FilterConfig, TimestampSource};
pub use context::{LogLine, LogRecord, ParsedFields, ProcessingStats};
pub use filter::LineFilter;
pub use sinks::DualSink;
pub use stream::{FilterPipeline, LineScanner, ScanEvent};
