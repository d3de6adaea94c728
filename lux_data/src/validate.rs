use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation finding for duplicate ids or dangling references in a Project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and id uniqueness in a Project.
///
/// The report is advisory: export degrades gracefully on dangling
/// references, so callers decide whether findings block anything.
///
/// ```
/// use lux_data::{Project, validate_project};
///
/// assert!(validate_project(&Project::default()).is_empty());
/// ```
pub fn validate_project(project: &Project) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut characters = HashSet::new();
    track_ids(
        "character",
        project.characters.iter().map(|c| c.id.as_str()),
        &mut characters,
        &mut errors,
    );

    let mut quests = HashSet::new();
    track_ids(
        "quest",
        project.quests.iter().map(|q| q.id.as_str()),
        &mut quests,
        &mut errors,
    );

    for quest in &project.quests {
        let mut conversations = HashSet::new();
        track_ids(
            "conversation",
            quest.conversations.iter().map(|c| c.id.as_str()),
            &mut conversations,
            &mut errors,
        );

        for conversation in &quest.conversations {
            let mut lines = HashSet::new();
            track_ids(
                "line",
                conversation.dialogue.iter().map(|l| l.id.as_str()),
                &mut lines,
                &mut errors,
            );

            for line in &conversation.dialogue {
                check_ref(
                    "character",
                    &line.character_id,
                    &characters,
                    format!("conversation '{}' line '{}'", conversation.title, line.id),
                    &mut errors,
                );
                for answer in &line.answers {
                    if let Some(target) = &answer.linked_conversation_id {
                        check_ref(
                            "conversation",
                            target,
                            &conversations,
                            format!("answer '{}' in conversation '{}'", answer.id, conversation.title),
                            &mut errors,
                        );
                    }
                }
            }
        }
    }

    errors
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    seen: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !seen.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(
    kind: &'static str,
    id: &str,
    known: &HashSet<String>,
    context: String,
    errors: &mut Vec<ValidationError>,
) {
    if !known.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quest_with_line(character_id: &str, answer_link: Option<&str>) -> Project {
        Project {
            characters: vec![Character {
                id: "char-1".into(),
                name: "Barkeep".into(),
                config_template: String::new(),
            }],
            quests: vec![Quest {
                id: "quest-1".into(),
                title: "Tavern Talk".into(),
                conversations: vec![Conversation {
                    id: "conv-1".into(),
                    title: "Greeting".into(),
                    dialogue: vec![DialogueLine {
                        id: "line-1".into(),
                        character_id: character_id.into(),
                        display_name: None,
                        text: "Hello".into(),
                        linked_to_next: true,
                        is_question: answer_link.is_some(),
                        answers: answer_link
                            .map(|link| {
                                vec![Answer {
                                    id: "ans-1".into(),
                                    text: "Hi".into(),
                                    linked_conversation_id: Some(link.into()),
                                }]
                            })
                            .unwrap_or_default(),
                    }],
                }],
            }],
        }
    }

    #[test]
    fn clean_project_passes() {
        let project = quest_with_line("char-1", Some("conv-1"));
        assert!(validate_project(&project).is_empty());
    }

    #[test]
    fn dangling_character_is_reported() {
        let project = quest_with_line("nobody", None);
        let errors = validate_project(&project);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::MissingReference { kind: "character", .. }
        ));
    }

    #[test]
    fn dangling_answer_link_is_reported() {
        let project = quest_with_line("char-1", Some("conv-missing"));
        let errors = validate_project(&project);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::MissingReference { kind: "conversation", .. }
        ));
    }

    #[test]
    fn duplicate_quest_ids_are_reported() {
        let mut project = quest_with_line("char-1", None);
        let clone = project.quests[0].clone();
        project.quests.push(clone);
        let errors = validate_project(&project);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::DuplicateId { kind: "quest", .. }
        )));
    }
}
