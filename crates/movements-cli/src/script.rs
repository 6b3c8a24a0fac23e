//! Event scripts: one event per line, text or JSON, `#` comments

use anyhow::{Context, Result};
use movements_core::Event;

/// Parse one script line; blank lines and comments yield `None`
pub fn parse_line(line: &str) -> Result<Option<Event>> {
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    }
    .trim();

    if line.is_empty() {
        return Ok(None);
    }
    let event = if line.starts_with('{') {
        serde_json::from_str::<Event>(line).with_context(|| format!("Bad JSON event: {line}"))?
    } else {
        line.parse::<Event>().with_context(|| format!("Bad event: {line}"))?
    };
    Ok(Some(event))
}

/// Parse a whole script, reporting the line number of the first bad line
pub fn parse_script(text: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if let Some(event) = parse_line(line).with_context(|| format!("line {}", number + 1))? {
            events.push(event);
        }
    }
    Ok(events)
}
