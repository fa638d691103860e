// UI layer: turns records into terminal output. Boards and lists print as
// plain `<id> <name>` lines; cards are grouped by their label combination
// and rendered as one table per group.

use std::io::IsTerminal;
use std::time::Duration;

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::model::Card;

/// Cards sharing one label combination.
#[derive(Debug)]
pub struct CardGroup<'a> {
    pub key: String,
    pub cards: Vec<&'a Card>,
}

/// Sort cards by their concatenated label names and split them into
/// contiguous groups. The sort is stable, so cards keep their API order
/// inside a group.
pub fn group_cards(cards: &[Card]) -> Vec<CardGroup<'_>> {
    let mut keyed: Vec<(String, &Card)> = cards.iter().map(|c| (c.group_key(), c)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut groups: Vec<CardGroup<'_>> = Vec::new();
    for (key, card) in keyed {
        match groups.last_mut() {
            Some(group) if group.key == key => group.cards.push(card),
            _ => groups.push(CardGroup {
                key,
                cards: vec![card],
            }),
        }
    }
    groups
}

/// Create a table. With a known terminal width the content is wrapped to
/// fit; without one (pipes, tests) rows are never wrapped.
pub fn new_table(width: Option<u16>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if let Some(width) = width {
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_width(width);
    }
    table
}

/// Width of the terminal stdout is attached to, if any.
pub fn terminal_width() -> Option<u16> {
    if !std::io::stdout().is_terminal() {
        return None;
    }
    crossterm::terminal::size().map(|(w, _)| w).ok()
}

pub fn render_group(group: &CardGroup<'_>, now: DateTime<Utc>, width: Option<u16>) -> Result<Table> {
    let mut table = new_table(width);
    table.set_header(vec!["id", "name", "labels", "start", "age", "last activity"]);

    for card in &group.cards {
        let last_activity = format!(
            "{} days ago ({})",
            card.days_since_last_activity(now)?,
            card.date_last_activity
        );
        table.add_row(vec![
            card.id.clone(),
            card.name.clone(),
            card.label_names().join(", "),
            card.start.clone().unwrap_or_default(),
            card.age(now)?.to_string(),
            last_activity,
        ]);
    }
    Ok(table)
}

/// Render every group as its title line followed by its table, in group
/// order. A malformed timestamp anywhere fails the whole render.
pub fn render_groups(groups: &[CardGroup<'_>], now: DateTime<Utc>, width: Option<u16>) -> Result<String> {
    let mut out = String::new();
    for group in groups {
        let table = render_group(group, now, width)?;
        out.push_str(&group.key);
        out.push('\n');
        out.push_str(&table.to_string());
        out.push('\n');
    }
    Ok(out)
}

/// One `<id> <name>` line per record.
pub fn format_entries<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    entries
        .into_iter()
        .map(|(id, name)| format!("{id} {name}\n"))
        .collect()
}

/// Run `fetch` behind a spinner on stderr. indicatif keeps the spinner
/// hidden when stderr is not a terminal.
pub fn with_spinner<T>(message: &str, fetch: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = fetch();
    spinner.finish_and_clear();
    result
}
