use serde::{Deserialize, Serialize};

/// Stable identifier used across project references.
///
/// The editor writes UUIDv4 strings; the exporter treats ids as opaque.
pub type Id = String;

/// Top-level editor document: the character roster plus every authored quest.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Project {
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub quests: Vec<Quest>,
}

/// A speaking character and the plugin configuration block emitted for it.
///
/// `config_template` is copied verbatim into every exported dialogue file
/// for lines spoken by this character, optionally patched with a per-line
/// display-name override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub config_template: String,
}

/// One exportable quest; its title becomes the archive root folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

/// Ordered sequence of dialogue lines; order is the fallback linkage order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
}

/// One spoken utterance; exports as one numbered file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueLine {
    pub id: Id,
    pub character_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub text: String,
    /// When true (the default) this line auto-advances to its successor.
    #[serde(default = "default_linked")]
    pub linked_to_next: bool,
    /// When true this line presents the `answers` as player choices.
    #[serde(default)]
    pub is_question: bool,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// One player-facing choice on a question line.
///
/// `linked_conversation_id` is a non-owning reference into the same quest;
/// when absent (or dangling) the answer falls through to the next line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: Id,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_conversation_id: Option<Id>,
}

fn default_linked() -> bool {
    true
}

impl Quest {
    /// Look up a conversation in this quest by id.
    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }
}

impl Project {
    /// Look up a character by id.
    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Look up a quest by id.
    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialogue_line_defaults_apply() {
        let line: DialogueLine =
            serde_json::from_str(r#"{"id": "l1", "character_id": "c1", "text": "Hello"}"#)
                .expect("parse line");
        assert!(line.linked_to_next);
        assert!(!line.is_question);
        assert!(line.answers.is_empty());
        assert!(line.display_name.is_none());
    }

    #[test]
    fn linked_to_next_false_round_trips() {
        let line = DialogueLine {
            id: "l1".into(),
            character_id: "c1".into(),
            display_name: None,
            text: "Bye".into(),
            linked_to_next: false,
            is_question: false,
            answers: Vec::new(),
        };
        let json = serde_json::to_string(&line).expect("serialize line");
        let back: DialogueLine = serde_json::from_str(&json).expect("parse line");
        assert!(!back.linked_to_next);
    }
}
