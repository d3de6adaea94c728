//! Id-arena store backing the dialogue editor.
//!
//! Each entity type lives in its own table keyed by id; parent-child
//! relations are ordered `Vec<Id>` lists on the parent record. Mutations
//! touch only the targeted record, and the compiler consumes immutable
//! value snapshots materialized on demand.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{Answer, Character, Conversation, DialogueLine, Id, Project, Quest};

/// Fields for a new dialogue line; the store assigns the id.
#[derive(Debug, Clone)]
pub struct LineDraft {
    pub character_id: Id,
    pub display_name: Option<String>,
    pub text: String,
    pub linked_to_next: bool,
    pub is_question: bool,
}

impl Default for LineDraft {
    fn default() -> Self {
        Self {
            character_id: String::new(),
            display_name: None,
            text: String::new(),
            linked_to_next: true,
            is_question: false,
        }
    }
}

#[derive(Debug, Clone)]
struct CharacterRec {
    name: String,
    config_template: String,
}

#[derive(Debug, Clone)]
struct QuestRec {
    title: String,
    conversations: Vec<Id>,
}

#[derive(Debug, Clone)]
struct ConversationRec {
    title: String,
    dialogue: Vec<Id>,
}

#[derive(Debug, Clone)]
struct LineRec {
    character_id: Id,
    display_name: Option<String>,
    text: String,
    linked_to_next: bool,
    is_question: bool,
    answers: Vec<Id>,
}

#[derive(Debug, Clone)]
struct AnswerRec {
    text: String,
    linked_conversation_id: Option<Id>,
}

/// In-memory project arena with CRUD operations mirroring the editor UI.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    characters: BTreeMap<Id, CharacterRec>,
    character_order: Vec<Id>,
    quests: BTreeMap<Id, QuestRec>,
    quest_order: Vec<Id>,
    conversations: BTreeMap<Id, ConversationRec>,
    lines: BTreeMap<Id, LineRec>,
    answers: BTreeMap<Id, AnswerRec>,
}

fn fresh_id() -> Id {
    Uuid::new_v4().to_string()
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- characters ---

    pub fn add_character(&mut self, name: &str, config_template: &str) -> Id {
        let id = fresh_id();
        self.characters.insert(
            id.clone(),
            CharacterRec {
                name: name.to_string(),
                config_template: config_template.to_string(),
            },
        );
        self.character_order.push(id.clone());
        id
    }

    pub fn update_character(
        &mut self,
        id: &str,
        name: Option<&str>,
        config_template: Option<&str>,
    ) -> bool {
        match self.characters.get_mut(id) {
            Some(rec) => {
                if let Some(name) = name {
                    rec.name = name.to_string();
                }
                if let Some(template) = config_template {
                    rec.config_template = template.to_string();
                }
                true
            },
            None => false,
        }
    }

    /// Remove a character. Lines referencing it keep their dangling id;
    /// the exporter degrades those to an empty configuration block.
    pub fn delete_character(&mut self, id: &str) -> bool {
        let removed = self.characters.remove(id).is_some();
        if removed {
            self.character_order.retain(|c| c != id);
        }
        removed
    }

    pub fn character(&self, id: &str) -> Option<Character> {
        self.characters.get(id).map(|rec| Character {
            id: id.to_string(),
            name: rec.name.clone(),
            config_template: rec.config_template.clone(),
        })
    }

    // --- quests ---

    pub fn add_quest(&mut self, title: &str) -> Id {
        let id = fresh_id();
        self.quests.insert(
            id.clone(),
            QuestRec {
                title: title.to_string(),
                conversations: Vec::new(),
            },
        );
        self.quest_order.push(id.clone());
        id
    }

    pub fn rename_quest(&mut self, id: &str, title: &str) -> bool {
        match self.quests.get_mut(id) {
            Some(rec) => {
                rec.title = title.to_string();
                true
            },
            None => false,
        }
    }

    pub fn delete_quest(&mut self, id: &str) -> bool {
        let Some(rec) = self.quests.remove(id) else {
            return false;
        };
        self.quest_order.retain(|q| q != id);
        for conv_id in rec.conversations {
            self.remove_conversation_tree(&conv_id);
        }
        true
    }

    pub fn quest_ids(&self) -> &[Id] {
        &self.quest_order
    }

    // --- conversations ---

    pub fn add_conversation(&mut self, quest_id: &str, title: &str) -> Option<Id> {
        if !self.quests.contains_key(quest_id) {
            return None;
        }
        let id = fresh_id();
        self.conversations.insert(
            id.clone(),
            ConversationRec {
                title: title.to_string(),
                dialogue: Vec::new(),
            },
        );
        if let Some(rec) = self.quests.get_mut(quest_id) {
            rec.conversations.push(id.clone());
        }
        Some(id)
    }

    pub fn rename_conversation(&mut self, id: &str, title: &str) -> bool {
        match self.conversations.get_mut(id) {
            Some(rec) => {
                rec.title = title.to_string();
                true
            },
            None => false,
        }
    }

    pub fn delete_conversation(&mut self, quest_id: &str, id: &str) -> bool {
        let Some(quest) = self.quests.get_mut(quest_id) else {
            return false;
        };
        let before = quest.conversations.len();
        quest.conversations.retain(|c| c != id);
        if quest.conversations.len() == before {
            return false;
        }
        self.remove_conversation_tree(id);
        true
    }

    // --- dialogue lines ---

    pub fn add_line(&mut self, conversation_id: &str, draft: LineDraft) -> Option<Id> {
        if !self.conversations.contains_key(conversation_id) {
            return None;
        }
        let id = fresh_id();
        self.lines.insert(
            id.clone(),
            LineRec {
                character_id: draft.character_id,
                display_name: draft.display_name,
                text: draft.text,
                linked_to_next: draft.linked_to_next,
                is_question: draft.is_question,
                answers: Vec::new(),
            },
        );
        if let Some(rec) = self.conversations.get_mut(conversation_id) {
            rec.dialogue.push(id.clone());
        }
        Some(id)
    }

    pub fn update_line(&mut self, id: &str, update: impl FnOnce(&mut LineDraft)) -> bool {
        let Some(rec) = self.lines.get_mut(id) else {
            return false;
        };
        let mut draft = LineDraft {
            character_id: rec.character_id.clone(),
            display_name: rec.display_name.clone(),
            text: rec.text.clone(),
            linked_to_next: rec.linked_to_next,
            is_question: rec.is_question,
        };
        update(&mut draft);
        rec.character_id = draft.character_id;
        rec.display_name = draft.display_name;
        rec.text = draft.text;
        rec.linked_to_next = draft.linked_to_next;
        rec.is_question = draft.is_question;
        true
    }

    pub fn delete_line(&mut self, conversation_id: &str, id: &str) -> bool {
        let Some(conv) = self.conversations.get_mut(conversation_id) else {
            return false;
        };
        let before = conv.dialogue.len();
        conv.dialogue.retain(|l| l != id);
        if conv.dialogue.len() == before {
            return false;
        }
        self.remove_line_tree(id);
        true
    }

    /// Move a line from one position to another within a conversation.
    /// This is a remove-and-insert, not a swap, matching drag reordering.
    pub fn reorder_line(&mut self, conversation_id: &str, from: usize, to: usize) -> bool {
        let Some(conv) = self.conversations.get_mut(conversation_id) else {
            return false;
        };
        if from >= conv.dialogue.len() || to >= conv.dialogue.len() {
            return false;
        }
        let id = conv.dialogue.remove(from);
        conv.dialogue.insert(to, id);
        true
    }

    // --- answers ---

    pub fn add_answer(
        &mut self,
        line_id: &str,
        text: &str,
        linked_conversation_id: Option<&str>,
    ) -> Option<Id> {
        if !self.lines.contains_key(line_id) {
            return None;
        }
        let id = fresh_id();
        self.answers.insert(
            id.clone(),
            AnswerRec {
                text: text.to_string(),
                linked_conversation_id: linked_conversation_id.map(str::to_string),
            },
        );
        if let Some(rec) = self.lines.get_mut(line_id) {
            rec.answers.push(id.clone());
        }
        Some(id)
    }

    pub fn update_answer(
        &mut self,
        id: &str,
        text: Option<&str>,
        linked_conversation_id: Option<Option<&str>>,
    ) -> bool {
        match self.answers.get_mut(id) {
            Some(rec) => {
                if let Some(text) = text {
                    rec.text = text.to_string();
                }
                if let Some(link) = linked_conversation_id {
                    rec.linked_conversation_id = link.map(str::to_string);
                }
                true
            },
            None => false,
        }
    }

    pub fn delete_answer(&mut self, line_id: &str, id: &str) -> bool {
        let Some(line) = self.lines.get_mut(line_id) else {
            return false;
        };
        let before = line.answers.len();
        line.answers.retain(|a| a != id);
        if line.answers.len() == before {
            return false;
        }
        self.answers.remove(id);
        true
    }

    // --- snapshots ---

    /// Materialize the immutable value tree for one quest. This is what the
    /// export compiler consumes; it never sees the arena itself.
    pub fn quest_snapshot(&self, quest_id: &str) -> Option<Quest> {
        let rec = self.quests.get(quest_id)?;
        let conversations = rec
            .conversations
            .iter()
            .filter_map(|id| self.conversation_snapshot(id))
            .collect();
        Some(Quest {
            id: quest_id.to_string(),
            title: rec.title.clone(),
            conversations,
        })
    }

    fn conversation_snapshot(&self, id: &str) -> Option<Conversation> {
        let rec = self.conversations.get(id)?;
        let dialogue = rec
            .dialogue
            .iter()
            .filter_map(|line_id| self.line_snapshot(line_id))
            .collect();
        Some(Conversation {
            id: id.to_string(),
            title: rec.title.clone(),
            dialogue,
        })
    }

    fn line_snapshot(&self, id: &str) -> Option<DialogueLine> {
        let rec = self.lines.get(id)?;
        let answers = rec
            .answers
            .iter()
            .filter_map(|answer_id| {
                self.answers.get(answer_id).map(|a| Answer {
                    id: answer_id.clone(),
                    text: a.text.clone(),
                    linked_conversation_id: a.linked_conversation_id.clone(),
                })
            })
            .collect();
        Some(DialogueLine {
            id: id.to_string(),
            character_id: rec.character_id.clone(),
            display_name: rec.display_name.clone(),
            text: rec.text.clone(),
            linked_to_next: rec.linked_to_next,
            is_question: rec.is_question,
            answers,
        })
    }

    /// Snapshot the character roster in editor order.
    pub fn characters_snapshot(&self) -> Vec<Character> {
        self.character_order
            .iter()
            .filter_map(|id| self.character(id))
            .collect()
    }

    /// Materialize the whole document for persistence.
    pub fn to_project(&self) -> Project {
        Project {
            characters: self.characters_snapshot(),
            quests: self
                .quest_order
                .iter()
                .filter_map(|id| self.quest_snapshot(id))
                .collect(),
        }
    }

    /// Rebuild the arena from a persisted document, keeping stored ids.
    pub fn from_project(project: Project) -> Self {
        let mut store = Self::new();
        for character in project.characters {
            store.character_order.push(character.id.clone());
            store.characters.insert(
                character.id,
                CharacterRec {
                    name: character.name,
                    config_template: character.config_template,
                },
            );
        }
        for quest in project.quests {
            let mut conv_ids = Vec::with_capacity(quest.conversations.len());
            for conversation in quest.conversations {
                let mut line_ids = Vec::with_capacity(conversation.dialogue.len());
                for line in conversation.dialogue {
                    let mut answer_ids = Vec::with_capacity(line.answers.len());
                    for answer in line.answers {
                        answer_ids.push(answer.id.clone());
                        store.answers.insert(
                            answer.id,
                            AnswerRec {
                                text: answer.text,
                                linked_conversation_id: answer.linked_conversation_id,
                            },
                        );
                    }
                    line_ids.push(line.id.clone());
                    store.lines.insert(
                        line.id,
                        LineRec {
                            character_id: line.character_id,
                            display_name: line.display_name,
                            text: line.text,
                            linked_to_next: line.linked_to_next,
                            is_question: line.is_question,
                            answers: answer_ids,
                        },
                    );
                }
                conv_ids.push(conversation.id.clone());
                store.conversations.insert(
                    conversation.id,
                    ConversationRec {
                        title: conversation.title,
                        dialogue: line_ids,
                    },
                );
            }
            store.quest_order.push(quest.id.clone());
            store.quests.insert(
                quest.id,
                QuestRec {
                    title: quest.title,
                    conversations: conv_ids,
                },
            );
        }
        store
    }

    fn remove_conversation_tree(&mut self, id: &str) {
        if let Some(rec) = self.conversations.remove(id) {
            for line_id in rec.dialogue {
                self.remove_line_tree(&line_id);
            }
        }
    }

    fn remove_line_tree(&mut self, id: &str) {
        if let Some(rec) = self.lines.remove(id) {
            for answer_id in rec.answers {
                self.answers.remove(&answer_id);
            }
        }
    }
}
