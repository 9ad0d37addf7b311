use crate::error::ProcessingError;
use crate::pipeline::context::{LogLine, LogRecord};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

const ARRAY_OPEN: &str = "[\n";
const ARRAY_CLOSE: &str = "\n]\n";
const ENTRY_SEPARATOR: &str = ",\n";
const ENTRY_INDENT: &str = "  ";

/// Raw lines and JSON records written side by side for each match
pub struct DualSink<R: Write, J: Write> {
    raw: R,
    json: J,
    entries: usize,
}

impl DualSink<BufWriter<File>, BufWriter<File>> {
    /// Open the raw sink for appending and truncate the JSON sink
    pub fn open(raw_path: &Path, json_path: &Path) -> Result<Self, ProcessingError> {
        let raw = OpenOptions::new()
            .create(true)
            .append(true)
            .open(raw_path)
            .map_err(|source| ProcessingError::OpenRawSink {
                path: raw_path.to_path_buf(),
                source,
            })?;

        let json = File::create(json_path).map_err(|source| ProcessingError::OpenJsonSink {
            path: json_path.to_path_buf(),
            source,
        })?;

        Self::new(BufWriter::new(raw), BufWriter::new(json))
    }
}

impl<R: Write, J: Write> DualSink<R, J> {
    /// Starts the JSON array immediately
    pub fn new(raw: R, mut json: J) -> Result<Self, ProcessingError> {
        json.write_all(ARRAY_OPEN.as_bytes())?;
        Ok(Self {
            raw,
            json,
            entries: 0,
        })
    }

    pub fn write(&mut self, line: &LogLine, record: &LogRecord) -> Result<(), ProcessingError> {
        self.raw.write_all(line.raw.as_bytes())?;
        if !line.is_terminated() {
            self.raw.write_all(b"\n")?;
        }

        if self.entries > 0 {
            self.json.write_all(ENTRY_SEPARATOR.as_bytes())?;
        }
        self.json.write_all(ENTRY_INDENT.as_bytes())?;
        serde_json::to_writer(&mut self.json, record)?;
        self.entries += 1;
        Ok(())
    }

    /// Close the JSON array and flush both sinks
    pub fn finish(mut self) -> Result<(R, J), ProcessingError> {
        self.json.write_all(ARRAY_CLOSE.as_bytes())?;
        self.raw.flush()?;
        self.json.flush()?;
        Ok((self.raw, self.json))
    }
}
