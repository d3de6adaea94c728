/// Derive a folder-safe name from a quest or conversation title.
///
/// Trims the edges and collapses every internal whitespace run to a single
/// underscore. Two titles that sanitize to the same name produce colliding
/// archive paths (last write wins); the editor does not defend against it.
pub fn sanitize_title(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_trims_edges() {
        assert_eq!(sanitize_title("  My   Quest  "), "My_Quest");
    }

    #[test]
    fn single_word_untouched() {
        assert_eq!(sanitize_title("Greeting"), "Greeting");
    }

    #[test]
    fn tabs_and_newlines_count_as_whitespace() {
        assert_eq!(sanitize_title("Tavern\tTalk\nTwo"), "Tavern_Talk_Two");
    }

    #[test]
    fn blank_title_sanitizes_to_empty() {
        assert_eq!(sanitize_title("   "), "");
    }
}
