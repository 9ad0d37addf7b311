use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use logsieve::config::{DEFAULT_INPUT_PATH, DEFAULT_JSON_SINK_PATH, DEFAULT_RAW_SINK_PATH};
use logsieve::{logging, ErrorStrategy, FilterConfig, FilterPipeline, TimestampSource};

const EXAMPLES: &str = "\
Examples:
  logsieve -level=INFO                 Filter logs by log level (e.g. INFO, ERROR, WARN)
  logsieve -keyword=disk               Filter logs by a custom keyword
  logsieve -file=app.log -level=ERROR  Read a specific log file
  logsieve -level=WARN -serverapi      Also save matches to apiresponse.log and a JSON file
  logsieve -serverapi -jsonfile=out.json";

#[derive(Parser, Debug)]
#[command(name = "logsieve")]
#[command(about = "Filter log files by level and keyword, with colored output")]
#[command(version)]
#[command(after_help = EXAMPLES)]
struct Args {
    /// Log level to filter (INFO, ERROR, WARN, etc.)
    #[arg(long, default_value = "")]
    level: String,

    /// Custom keyword to filter logs
    #[arg(long, default_value = "")]
    keyword: String,

    /// Path to the log file
    #[arg(long, default_value = DEFAULT_INPUT_PATH)]
    file: PathBuf,

    /// Save matching lines to apiresponse.log and to the JSON file
    #[arg(long)]
    serverapi: bool,

    /// Path to the JSON log file
    #[arg(long, default_value = DEFAULT_JSON_SINK_PATH)]
    jsonfile: PathBuf,

    /// Source of the date/time written to JSON records
    #[arg(long, value_enum, default_value_t = TimestampSource::ProcessingTime)]
    timestamps: TimestampSource,

    /// Fail on the first malformed line instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Debug mode - show processing details
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn color_preference(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    fn into_config(self) -> FilterConfig {
        let color = self.color_preference();
        FilterConfig {
            dual_sink: self.serverapi,
            input_path: self.file,
            raw_sink_path: PathBuf::from(DEFAULT_RAW_SINK_PATH),
            json_sink_path: self.jsonfile,
            error_strategy: if self.fail_fast {
                ErrorStrategy::FailFast
            } else {
                ErrorStrategy::Skip
            },
            timestamp_source: self.timestamps,
            color,
            debug: self.debug,
            ..FilterConfig::default()
        }
        .with_level(self.level)
        .with_keyword(self.keyword)
    }
}

/// Long options that may also be spelled with a single dash (`-level=INFO`)
const LONG_FLAGS: &[&str] = &[
    "level",
    "keyword",
    "file",
    "serverapi",
    "jsonfile",
    "timestamps",
    "fail-fast",
    "color",
    "no-color",
    "debug",
    "help",
    "version",
];

fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut past_separator = false;
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || past_separator {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                past_separator = true;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{}", s))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

fn main() {
    let argv = normalize_args(std::env::args_os());

    if argv.len() <= 1 {
        // No flags: print usage and do nothing
        let _ = Args::command().print_long_help();
        return;
    }

    let args = Args::parse_from(argv);
    logging::init_logging(args.debug);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = args.into_config();
    let debug = config.debug;
    let input = config.input_path.clone();
    let pipeline = FilterPipeline::new(config);

    let stats = pipeline
        .run()
        .with_context(|| format!("filtering {}", input.display()))?;

    // Print final stats if debug mode
    if debug {
        eprintln!("Final statistics:");
        eprintln!("  Lines read: {}", stats.lines_read);
        eprintln!("  Lines matched: {}", stats.lines_matched);
        eprintln!("  Lines skipped: {}", stats.lines_skipped);
        eprintln!("  Malformed: {}", stats.malformed);
        eprintln!("  Processing time: {:?}", stats.processing_time);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(normalize_args(os_args(args))).unwrap()
    }

    #[test]
    fn test_single_dash_long_flags() {
        let normalized = normalize_args(os_args(&[
            "logsieve",
            "-level=INFO",
            "-keyword",
            "disk",
            "-serverapi",
            "-h",
        ]));
        assert_eq!(
            normalized,
            os_args(&["logsieve", "--level=INFO", "--keyword", "disk", "--serverapi", "-h"])
        );
    }

    #[test]
    fn test_values_and_separator_untouched() {
        let normalized = normalize_args(os_args(&[
            "logsieve",
            "--keyword",
            "-x",
            "--",
            "-file",
        ]));
        assert_eq!(
            normalized,
            os_args(&["logsieve", "--keyword", "-x", "--", "-file"])
        );
    }

    #[test]
    fn test_defaults_from_cli() {
        let config = parse(&["logsieve", "-level=INFO"]).into_config();
        assert_eq!(config.level.as_deref(), Some("INFO"));
        assert_eq!(config.keyword, None);
        assert_eq!(config.input_path, PathBuf::from("sample.log"));
        assert_eq!(config.raw_sink_path, PathBuf::from("apiresponse.log"));
        assert_eq!(config.json_sink_path, PathBuf::from("apiresponse.json"));
        assert!(!config.dual_sink);
        assert_eq!(config.color, None);
    }

    #[test]
    fn test_full_cli() {
        let config = parse(&[
            "logsieve",
            "-file=app.log",
            "-serverapi",
            "-jsonfile=out.json",
            "--timestamps",
            "line",
            "--fail-fast",
            "--no-color",
        ])
        .into_config();
        assert!(config.dual_sink);
        assert_eq!(config.input_path, PathBuf::from("app.log"));
        assert_eq!(config.json_sink_path, PathBuf::from("out.json"));
        assert_eq!(config.timestamp_source, TimestampSource::Line);
        assert_eq!(config.error_strategy, ErrorStrategy::FailFast);
        assert_eq!(config.color, Some(false));
    }

    #[test]
    fn test_color_flags_conflict() {
        let result = Args::try_parse_from(os_args(&["logsieve", "--color", "--no-color"]));
        assert!(result.is_err());
    }
}
