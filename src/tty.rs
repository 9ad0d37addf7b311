use is_terminal::IsTerminal;
use std::ffi::OsStr;

/// Colors are on when stdout is a terminal and NO_COLOR is not set
pub fn should_use_colors() -> bool {
    colors_enabled(
        std::env::var_os("NO_COLOR").as_deref(),
        std::io::stdout().is_terminal(),
    )
}

/// A non-empty NO_COLOR disables colors even on a terminal
fn colors_enabled(no_color: Option<&OsStr>, is_terminal: bool) -> bool {
    if no_color.is_some_and(|v| !v.is_empty()) {
        return false;
    }
    is_terminal
}

/// Resolve a forced preference against terminal detection
pub fn resolve_colors(preference: Option<bool>) -> bool {
    preference.unwrap_or_else(should_use_colors)
}
