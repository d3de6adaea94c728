//! Quest compiler: lowers a quest snapshot into the per-line YAML units
//! consumed by the LuxDialogues plugin.
//!
//! One file is emitted per dialogue line, named `<1-based index>.yml` and
//! nested under `<quest folder>/<conversation folder>/`. Cross-references
//! between lines and conversations are encoded as `@redirect` path strings
//! the plugin resolves at runtime. Compilation never fails: dangling
//! references degrade (empty character block, fallthrough routing) and are
//! reported through `log::warn!`.

use std::sync::OnceLock;

use lux_data::{Character, DialogueLine, Quest};
use regex::{Captures, Regex};

use crate::sanitize::sanitize_title;
use crate::wrap::wrap_text_at;

/// Column budget for wrapped dialogue text. Exports prior to the plugin's
/// UI overhaul used 32.
pub const DEFAULT_WRAP_WIDTH: usize = 37;

/// Extension for per-line unit files.
pub const LINE_FILE_EXT: &str = "yml";

/// Notification sound attached to every answer entry.
pub const ANSWER_SOUND: &str = "luxdialogues:luxdialogues.sounds.ding";

/// Insertion-ordered mapping from relative archive path to file content.
///
/// Order matters to consumers that stream the archive: conversation order,
/// then line order, never lexicographic (which would sort `10.yml` before
/// `2.yml`).
#[derive(Debug, Clone, Default)]
pub struct Archive {
    files: Vec<(String, String)>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file, replacing any earlier entry at the same path.
    /// Colliding sanitized titles land here; last write wins.
    pub fn push(&mut self, path: String, contents: String) {
        if let Some(entry) = self.files.iter_mut().find(|(p, _)| *p == path) {
            entry.1 = contents;
        } else {
            self.files.push((path, contents));
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, c)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|(p, _)| p.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn name_field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(Character:\s*\n\s*name:\s*).*").expect("static pattern compiles")
    })
}

/// Rewrite the `Character: name:` field of a configuration template to a
/// per-line display-name override. Single-shot; templates without a
/// matching field pass through unmodified.
fn patch_display_name(template: &str, display_name: &str) -> String {
    name_field_regex()
        .replace(template, |caps: &Captures<'_>| {
            format!("{}{}", &caps[1], display_name)
        })
        .into_owned()
}

/// Compile one quest against a character roster.
///
/// Walks conversations in stored order and emits one YAML unit per
/// dialogue line at `<quest>/<conversation>/<n>.yml`. Infallible by
/// design: every failure mode the input can present has a defined
/// degraded output (see module docs).
pub fn compile_quest(quest: &Quest, characters: &[Character], width: usize) -> Archive {
    let quest_folder = sanitize_title(&quest.title);
    let mut archive = Archive::new();

    for conversation in &quest.conversations {
        let conv_folder = sanitize_title(&conversation.title);

        for (index, line) in conversation.dialogue.iter().enumerate() {
            let has_next = index + 1 < conversation.dialogue.len();
            let unit = emit_line_unit(
                quest,
                characters,
                line,
                &quest_folder,
                &conv_folder,
                index,
                has_next,
                width,
            );
            let path = format!("{quest_folder}/{conv_folder}/{}.{LINE_FILE_EXT}", index + 1);
            log::debug!("emitting '{path}'");
            archive.push(path, unit);
        }
    }

    archive
}

#[allow(clippy::too_many_arguments)]
fn emit_line_unit(
    quest: &Quest,
    characters: &[Character],
    line: &DialogueLine,
    quest_folder: &str,
    conv_folder: &str,
    index: usize,
    has_next: bool,
    width: usize,
) -> String {
    let mut template = match characters.iter().find(|c| c.id == line.character_id) {
        Some(character) => character.config_template.clone(),
        None => {
            log::warn!(
                "line '{}' references unknown character '{}'; emitting empty config block",
                line.id,
                line.character_id
            );
            String::new()
        },
    };
    // An empty override is treated as unset, matching editor behavior.
    if let Some(display_name) = line.display_name.as_deref().filter(|n| !n.is_empty()) {
        template = patch_display_name(&template, display_name);
    }

    let wrapped = wrap_text_at(&line.text, width);
    let lines: Vec<&str> = wrapped
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut unit = format!("{template}\n\"Dialogue\":\n  \"1\":\n    \"lines\":\n");
    for l in &lines {
        unit.push_str(&format!("      - \"{}\"\n", escape_quotes(l)));
    }

    let successor = format!("{quest_folder}/{conv_folder}/{} @redirect", index + 2);
    if has_next && line.linked_to_next {
        unit.push_str("  \"2\":\n    \"post-actions\":\n");
        unit.push_str(&format!("      - \"{successor}\"\n"));
    }

    if line.is_question && !line.answers.is_empty() {
        unit.push_str("Answers:\n");
        for (answer_index, answer) in line.answers.iter().enumerate() {
            let linked = answer
                .linked_conversation_id
                .as_deref()
                .and_then(|id| quest.conversation(id));
            if answer.linked_conversation_id.is_some() && linked.is_none() {
                log::warn!(
                    "answer '{}' links to unknown conversation '{}'; falling through",
                    answer.id,
                    answer.linked_conversation_id.as_deref().unwrap_or_default()
                );
            }

            let action_path = match linked {
                Some(target) => Some(format!(
                    "{quest_folder}/{}/1 @redirect",
                    sanitize_title(&target.title)
                )),
                None if has_next => Some(successor.clone()),
                None => None,
            };

            unit.push_str(&format!("  '{}':\n", answer_index + 1));
            unit.push_str(&format!("    text: \"{}\"\n", escape_quotes(&answer.text)));
            unit.push_str(&format!("    sound: {ANSWER_SOUND}\n"));
            if let Some(path) = action_path {
                unit.push_str("    actions:\n");
                unit.push_str(&format!("      - \"{path}\"\n"));
            }
        }
    }

    unit
}

fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}
