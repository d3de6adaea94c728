//! lux_export: compiler and packaging for LuxQuest dialogue archives.
//!
//! Takes an immutable quest snapshot from `lux_data`, wraps each line's
//! text for in-game display, and emits one YAML unit per dialogue line
//! with `@redirect` path strings encoding line-to-line and answer
//! branching. The resulting path-to-content archive is serialized as a
//! folder tree or a `<quest>.zip` for the LuxDialogues plugin.

pub mod compile;
pub mod package;
pub mod project;
pub mod sanitize;
pub mod wrap;

pub use compile::{ANSWER_SOUND, Archive, DEFAULT_WRAP_WIDTH, LINE_FILE_EXT, compile_quest};
pub use package::{PackageError, write_archive, zip_archive};
pub use project::{ProjectError, load_project, select_quest};
pub use sanitize::sanitize_title;
pub use wrap::wrap_text_at;
