//! Loading editor project documents and selecting a quest to export.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lux_data::{Project, Quest};
use thiserror::Error;

/// Errors reading or querying a project document.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("unable to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid project file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no quest matching '{wanted}' in project")]
    QuestNotFound { wanted: String },
}

/// Read a project document (the editor's persisted JSON) from disk.
///
/// # Errors
/// - `ProjectError::Read` when the file cannot be read.
/// - `ProjectError::Parse` when the contents are not a valid project.
pub fn load_project(path: &Path) -> Result<Project, ProjectError> {
    let raw = fs::read_to_string(path).map_err(|source| ProjectError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ProjectError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Select a quest by id, falling back to an exact title match.
///
/// Ids are unambiguous; titles are what the editor shows, so both work.
///
/// # Errors
/// - `ProjectError::QuestNotFound` when neither matches.
pub fn select_quest<'a>(project: &'a Project, wanted: &str) -> Result<&'a Quest, ProjectError> {
    project
        .quest(wanted)
        .or_else(|| project.quests.iter().find(|q| q.title == wanted))
        .ok_or_else(|| ProjectError::QuestNotFound {
            wanted: wanted.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_quest_project() -> Project {
        Project {
            characters: Vec::new(),
            quests: vec![
                Quest {
                    id: "q1".into(),
                    title: "Tavern Talk".into(),
                    conversations: Vec::new(),
                },
                Quest {
                    id: "q2".into(),
                    title: "Harbor Run".into(),
                    conversations: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn selects_by_id_then_title() {
        let project = two_quest_project();
        assert_eq!(select_quest(&project, "q2").expect("id match").title, "Harbor Run");
        assert_eq!(select_quest(&project, "Tavern Talk").expect("title match").id, "q1");
    }

    #[test]
    fn missing_quest_is_an_error() {
        let project = two_quest_project();
        assert!(select_quest(&project, "Nope").is_err());
    }
}
