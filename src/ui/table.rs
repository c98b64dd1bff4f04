use crate::note::Note;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct NoteRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Created")]
    pub created: String,
    #[tabled(rename = "Content")]
    pub content: String,
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            created: note.display_timestamp(),
            content: note.content.clone(),
        }
    }
}

pub fn notes_table(notes: &[Note]) -> String {
    if notes.is_empty() {
        return String::new();
    }

    let rows: Vec<NoteRow> = notes.iter().map(NoteRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
