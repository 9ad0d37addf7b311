use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "sample.log";
pub const DEFAULT_RAW_SINK_PATH: &str = "apiresponse.log";
pub const DEFAULT_JSON_SINK_PATH: &str = "apiresponse.json";

/// Configuration for a single filter run
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub level: Option<String>,
    pub keyword: Option<String>,
    pub input_path: PathBuf,
    /// Persist matches to the raw and JSON sinks as well as the console
    pub dual_sink: bool,
    pub raw_sink_path: PathBuf,
    pub json_sink_path: PathBuf,
    pub error_strategy: ErrorStrategy,
    pub timestamp_source: TimestampSource,
    /// None = auto-detect, Some(true/false) = forced
    pub color: Option<bool>,
    pub debug: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            level: None,
            keyword: None,
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            dual_sink: false,
            raw_sink_path: PathBuf::from(DEFAULT_RAW_SINK_PATH),
            json_sink_path: PathBuf::from(DEFAULT_JSON_SINK_PATH),
            error_strategy: ErrorStrategy::Skip,
            timestamp_source: TimestampSource::ProcessingTime,
            color: None,
            debug: false,
        }
    }
}

impl FilterConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = non_empty(level.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = non_empty(keyword.into());
        self
    }
}

/// An empty filter matches everything, so it is stored as absent
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// What to do with a matching line that has fewer than three fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStrategy {
    /// Skip problematic lines and continue processing
    Skip,
    /// Stop processing on first error
    FailFast,
}

/// Where the date/time of a JSON record come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TimestampSource {
    /// Wall-clock time when the line is processed
    #[default]
    #[value(name = "processing")]
    ProcessingTime,
    /// The date and time tokens of the line itself
    #[value(name = "line")]
    Line,
}
