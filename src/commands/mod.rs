pub mod history;
pub mod players;
pub mod team;

use anyhow::{bail, Context, Result};

/// Parse an optional season argument, defaulting to the configured season.
///
/// Accepts the 8-digit id form, e.g. "20232024". Returns an error for
/// anything else.
pub fn parse_season(season: Option<String>, default: i64) -> Result<i64> {
    let Some(s) = season else {
        return Ok(default);
    };
    if s.len() != 8 || !s.chars().all(|c| c.is_ascii_digit()) {
        bail!("Invalid season '{}'. Use the 8-digit form, e.g. 20232024", s);
    }
    s.parse::<i64>()
        .with_context(|| format!("Invalid season '{}'", s))
}

/// Pad a string to a display width, accounting for wide characters.
fn pad_name(name: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let pad = width.saturating_sub(name.width());
    format!("{}{}", name, " ".repeat(pad))
}
