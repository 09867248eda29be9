//! Output formatting helpers.
//!
//! Data goes to stdout, as JSON. Status lines go to stderr.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Print a dimmed note.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as JSON, pretty-printed on request.
pub fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

/// Print each item on its own line, or as one pretty array.
pub fn emit_all<T: Serialize>(items: &[T], pretty: bool) -> Result<()> {
    if pretty {
        return emit(&items, true);
    }
    for item in items {
        emit(item, false)?;
    }
    Ok(())
}
