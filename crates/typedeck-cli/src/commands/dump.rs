use std::path::Path;

use anyhow::Result;
use chrono::Local;

use typedeck_core::{deck::BlockKind, typewriter::lines::parse_lines, Deck};

/// Print every block's fully revealed text, no animation
pub fn run(deck_path: &Path) -> Result<()> {
    let deck = Deck::load(deck_path)?;
    let now = Local::now().naive_local();

    let mut first = true;
    for spec in &deck.blocks {
        let body = match spec.kind {
            BlockKind::Type => match spec.lines.as_deref() {
                Some(payload) => parse_lines(payload, now).join("\n"),
                None => continue,
            },
            BlockKind::Note => match spec.text.as_deref() {
                Some(text) => text.to_string(),
                None => continue,
            },
        };

        if !first {
            println!();
        }
        first = false;

        if let Some(title) = spec.title.as_deref() {
            println!("── {title} ──");
        }
        println!("{body}");
    }

    Ok(())
}
