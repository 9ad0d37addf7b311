use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("error opening log file '{}'", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error opening raw sink '{}'", path.display())]
    OpenRawSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error creating JSON sink '{}'", path.display())]
    OpenJsonSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed line {line_number}: expected at least 3 fields, found {tokens}")]
    MalformedLine { line_number: usize, tokens: usize },

    #[error("read error after line {line_number}")]
    Read {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
