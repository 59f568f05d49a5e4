use std::path::Path;

use anyhow::Result;
use chrono::Local;

use typedeck_core::{deck::BlockKind, typewriter::lines::parse_lines, AppConfig, Deck, Pace};

/// Validate a deck file and describe what it will play
pub fn run(config: &AppConfig, deck_path: &Path) -> Result<()> {
    let deck = Deck::load(deck_path)?;
    let base_pace = Pace::from_config(&config.typing);
    let now = Local::now().naive_local();

    println!(
        "deck: {} ({} blocks)",
        deck.title.as_deref().unwrap_or("untitled"),
        deck.blocks.len()
    );

    let mut playable = 0usize;
    for (index, spec) in deck.blocks.iter().enumerate() {
        let title = spec.title.as_deref().unwrap_or("-");
        match spec.kind {
            BlockKind::Type => {
                let Some(payload) = spec.lines.as_deref() else {
                    println!("  #{index} type  \"{title}\"  SKIPPED: no lines attribute");
                    continue;
                };
                let lines = parse_lines(payload, now);
                let pace = spec.pace(base_pace);
                let note = if lines.is_empty() {
                    "  (payload empty or malformed)"
                } else {
                    ""
                };
                println!(
                    "  #{index} type  \"{title}\"  {} lines, {}ms/{}ms{}{}{}",
                    lines.len(),
                    pace.speed.as_millis(),
                    pace.delay.as_millis(),
                    if spec.autostart() { ", autostart" } else { "" },
                    if spec.lock_height { ", lock-height" } else { "" },
                    note,
                );
                playable += 1;
            }
            BlockKind::Note => {
                let rows = spec.text.as_deref().map(|t| t.lines().count()).unwrap_or(0);
                println!("  #{index} note  \"{title}\"  {rows} lines");
                playable += 1;
            }
        }
    }

    println!("{playable} of {} blocks will render", deck.blocks.len());
    Ok(())
}
