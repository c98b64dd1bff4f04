use crate::note::Note;
use crate::ui::{error_theme, theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::NOTE, text.style(theme().title));
}

pub fn banner(title: &str, subtitle: &str) {
    println!("{}", title.style(theme().title));
    println!("  {}", subtitle.style(theme().quiet));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().confirm));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(error_theme().failure));
}

/// `<id> - <time>: <content>`, the same shape as the note's Display
pub fn note_line(note: &Note) {
    println!(
        "{} - {}: {}",
        note.id.style(theme().note_id),
        note.display_timestamp().style(theme().stamp),
        note.content
    );
}

pub fn empty(label: &str) {
    println!("{} {}", Icons::EMPTY, label.style(theme().quiet));
}
