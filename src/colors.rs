use crate::error::ProcessingError;
use crate::pipeline::context::ParsedFields;
use std::io::Write;

const RESET: &str = "\x1b[0m";

/// Terminal colors used for console rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightWhite,
}

impl Color {
    pub fn ansi(self) -> &'static str {
        match self {
            Color::White => "\x1b[37m",
            Color::BrightBlack => "\x1b[90m", // gray
            Color::BrightRed => "\x1b[91m",
            Color::BrightGreen => "\x1b[92m",
            Color::BrightWhite => "\x1b[97m",
        }
    }
}

/// Per-field colors for one level label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStyle {
    pub date: Color,
    pub time: Color,
    pub label: Color,
    pub message: Color,
}

const fn style(label: Color) -> LevelStyle {
    LevelStyle {
        date: Color::BrightRed,
        time: Color::BrightBlack,
        label,
        message: Color::White,
    }
}

/// Labels with their own style, keyed by uppercase label
const LEVEL_STYLES: &[(&str, LevelStyle)] = &[
    ("WARNING", style(Color::BrightRed)),
    ("TRACE", style(Color::BrightWhite)),
];

const DEFAULT_STYLE: LevelStyle = style(Color::BrightGreen);

/// Style lookup on the Unicode-uppercased label
pub fn style_for(label: &str) -> &'static LevelStyle {
    let upper = label.to_uppercase();
    LEVEL_STYLES
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|(_, style)| style)
        .unwrap_or(&DEFAULT_STYLE)
}

/// Writes matching lines to the console, colored by level
#[derive(Debug, Clone, Copy)]
pub struct Colorizer {
    use_colors: bool,
}

impl Colorizer {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn render<W: Write>(&self, out: &mut W, fields: &ParsedFields<'_>) -> std::io::Result<()> {
        let style = style_for(fields.label);
        self.paint(out, style.date, fields.date)?;
        out.write_all(b" ")?;
        self.paint(out, style.time, fields.time)?;
        out.write_all(b" ")?;
        self.paint(out, style.label, fields.label)?;
        out.write_all(b" ")?;
        self.paint(out, style.message, &fields.message)?;
        out.write_all(b"\n")
    }

    /// Tokenize and render a raw line
    pub fn render_line<W: Write>(
        &self,
        out: &mut W,
        line: &str,
        line_number: usize,
    ) -> Result<(), ProcessingError> {
        let fields = ParsedFields::parse(line, line_number)?;
        self.render(out, &fields)?;
        Ok(())
    }

    fn paint<W: Write>(&self, out: &mut W, color: Color, text: &str) -> std::io::Result<()> {
        if self.use_colors {
            write!(out, "{}{}{}", color.ansi(), text, RESET)
        } else {
            out.write_all(text.as_bytes())
        }
    }
}
