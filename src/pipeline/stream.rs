// src/pipeline/stream.rs
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::time::Instant;

use chrono::Local;
use tracing::{debug, warn};

use crate::colors::Colorizer;
use crate::error::ProcessingError;
use crate::pipeline::config::{ErrorStrategy, FilterConfig};
use crate::pipeline::context::{LogLine, LogRecord, ParsedFields, ProcessingStats};
use crate::pipeline::filter::LineFilter;
use crate::pipeline::sinks::DualSink;
use crate::tty::resolve_colors;

/// One step of reading the input
#[derive(Debug)]
pub enum ScanEvent {
    Line(LogLine),
    EndOfStream,
    ReadError(io::Error),
}

/// Reads lines with their terminators, decoding UTF-8 lossily
pub struct LineScanner<R: BufRead> {
    input: R,
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line_number: 0,
            buf: Vec::new(),
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn next_event(&mut self) -> ScanEvent {
        self.buf.clear();
        match self.input.read_until(b'\n', &mut self.buf) {
            Ok(0) => ScanEvent::EndOfStream,
            Ok(_) => {
                self.line_number += 1;
                let raw = String::from_utf8_lossy(&self.buf).into_owned();
                ScanEvent::Line(LogLine::new(self.line_number, raw))
            }
            Err(e) => ScanEvent::ReadError(e),
        }
    }
}

/// Outcome of handling one matching line
enum LineOutcome {
    Written,
    Malformed,
    ConsoleClosed,
}

/// Scan, filter, and fan matching lines out to the console and sinks
pub struct FilterPipeline {
    config: FilterConfig,
    filter: LineFilter,
    colorizer: Colorizer,
}

impl FilterPipeline {
    pub fn new(config: FilterConfig) -> Self {
        let filter = LineFilter::from_config(&config);
        let colorizer = Colorizer::new(resolve_colors(config.color));
        FilterPipeline {
            config,
            filter,
            colorizer,
        }
    }

    /// Run against the configured input, stdout, and (optionally) the sink files
    pub fn run(&self) -> Result<ProcessingStats, ProcessingError> {
        let path = &self.config.input_path;
        let file = File::open(path).map_err(|source| ProcessingError::OpenInput {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "opened input");
        let input = BufReader::new(file);

        let mut sinks = if self.config.dual_sink {
            let sinks = DualSink::open(&self.config.raw_sink_path, &self.config.json_sink_path)?;
            debug!(
                raw = %self.config.raw_sink_path.display(),
                json = %self.config.json_sink_path.display(),
                "opened sinks"
            );
            Some(sinks)
        } else {
            None
        };

        let stdout = io::stdout();
        let mut console = io::BufWriter::new(stdout.lock());

        let outcome = self.process_stream(input, &mut console, sinks.as_mut());

        // Sinks are closed on error paths too so the JSON stays a valid array
        let finished = match sinks {
            Some(sinks) => sinks.finish().map(|_| ()),
            None => Ok(()),
        };
        let flushed = match console.flush() {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        };

        let stats = outcome?;
        finished?;
        flushed?;
        Ok(stats)
    }

    /// Process a single stream. Sinks are written but not finished here.
    pub fn process_stream<R, W, RS, JS>(
        &self,
        input: R,
        console: &mut W,
        mut sinks: Option<&mut DualSink<RS, JS>>,
    ) -> Result<ProcessingStats, ProcessingError>
    where
        R: BufRead,
        W: Write,
        RS: Write,
        JS: Write,
    {
        let start_time = Instant::now();
        let mut stats = ProcessingStats::default();
        let mut scanner = LineScanner::new(input);

        loop {
            let line = match scanner.next_event() {
                ScanEvent::Line(line) => line,
                ScanEvent::EndOfStream => break,
                ScanEvent::ReadError(source) => {
                    return Err(ProcessingError::Read {
                        line_number: scanner.line_number(),
                        source,
                    });
                }
            };
            stats.lines_read += 1;

            if !self.filter.matches(line.content()) {
                stats.lines_skipped += 1;
                continue;
            }

            match self.handle_match(&line, console, sinks.as_deref_mut())? {
                LineOutcome::Written => stats.lines_matched += 1,
                LineOutcome::Malformed => stats.malformed += 1,
                LineOutcome::ConsoleClosed => {
                    debug!(line = line.line_number, "console closed, stopping");
                    break;
                }
            }
        }

        stats.processing_time = start_time.elapsed();
        debug!(
            lines_read = stats.lines_read,
            lines_matched = stats.lines_matched,
            lines_skipped = stats.lines_skipped,
            malformed = stats.malformed,
            "scan finished"
        );
        Ok(stats)
    }

    fn handle_match<W, RS, JS>(
        &self,
        line: &LogLine,
        console: &mut W,
        sinks: Option<&mut DualSink<RS, JS>>,
    ) -> Result<LineOutcome, ProcessingError>
    where
        W: Write,
        RS: Write,
        JS: Write,
    {
        let fields = match ParsedFields::parse(line.content(), line.line_number) {
            Ok(fields) => fields,
            Err(err) => match self.config.error_strategy {
                ErrorStrategy::FailFast => return Err(err),
                ErrorStrategy::Skip => {
                    warn!(line = line.line_number, "{}, skipping", err);
                    return Ok(LineOutcome::Malformed);
                }
            },
        };

        if let Err(e) = self.colorizer.render(console, &fields) {
            // Handle broken pipe gracefully
            if e.kind() == io::ErrorKind::BrokenPipe {
                return Ok(LineOutcome::ConsoleClosed);
            }
            return Err(e.into());
        }

        if let Some(sinks) = sinks {
            let record =
                LogRecord::from_fields(&fields, self.config.timestamp_source, &Local::now());
            sinks.write(line, &record)?;
        }

        Ok(LineOutcome::Written)
    }
}
