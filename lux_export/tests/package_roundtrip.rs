use std::fs::{self, File};

use lux_data::{Character, Conversation, DialogueLine, Quest};
use lux_export::{compile_quest, write_archive, zip_archive};

fn sample_quest() -> (Quest, Vec<Character>) {
    let quest = Quest {
        id: "q".into(),
        title: "Harbor Run".into(),
        conversations: vec![Conversation {
            id: "c".into(),
            title: "Docks".into(),
            dialogue: vec![DialogueLine {
                id: "l1".into(),
                character_id: "dockhand".into(),
                display_name: None,
                text: "Mind the ropes.".into(),
                linked_to_next: true,
                is_question: false,
                answers: Vec::new(),
            }],
        }],
    };
    let characters = vec![Character {
        id: "dockhand".into(),
        name: "Dockhand".into(),
        config_template: "Character:\n  name: Dockhand\n".into(),
    }];
    (quest, characters)
}

#[test]
fn write_archive_creates_folder_tree() {
    let (quest, characters) = sample_quest();
    let archive = compile_quest(&quest, &characters, 37);
    let dir = tempfile::tempdir().expect("temp dir");

    write_archive(&archive, dir.path()).expect("write archive");

    let file = dir.path().join("Harbor_Run/Docks/1.yml");
    let written = fs::read_to_string(&file).expect("exported file exists");
    assert_eq!(Some(written.as_str()), archive.get("Harbor_Run/Docks/1.yml"));
}

#[test]
fn zip_archive_packages_every_entry() {
    let (quest, characters) = sample_quest();
    let archive = compile_quest(&quest, &characters, 37);
    let dir = tempfile::tempdir().expect("temp dir");

    let dest = zip_archive(&archive, &quest.title, dir.path()).expect("zip archive");
    assert_eq!(dest.file_name().and_then(|n| n.to_str()), Some("Harbor_Run.zip"));

    let mut zip = zip::ZipArchive::new(File::open(&dest).expect("zip exists")).expect("open zip");
    let mut entry = zip
        .by_name("Harbor_Run/Docks/1.yml")
        .expect("entry present under quest folder");
    let mut contents = String::new();
    std::io::Read::read_to_string(&mut entry, &mut contents).expect("read entry");
    assert_eq!(Some(contents.as_str()), archive.get("Harbor_Run/Docks/1.yml"));
}
