pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{banner, empty, error, header, note_line, success};
pub use table::notes_table;
pub use theme::{error_theme, theme, Theme};
