//! Fixed-width reflow for in-game dialogue text.
//!
//! The plugin renders each dialogue line inside a fixed-width box, so text
//! is wrapped before export. Historical exports depend on the exact wrap
//! behavior here, including its quirks, so this stays hand-rolled instead
//! of delegating to a wrapping crate that would normalize them away.

/// Wrap `text` to at most `width` characters per line.
///
/// Splits on explicit newlines first and wraps each segment independently.
/// A segment already within `width` passes through verbatim, preserving any
/// internal spacing; longer segments are re-tokenized on single spaces and
/// greedily packed. A single word longer than `width` is emitted on its own
/// line, never split or truncated.
pub fn wrap_text_at(text: &str, width: usize) -> String {
    let mut wrapped: Vec<String> = Vec::new();

    for segment in text.split('\n') {
        if segment.chars().count() <= width {
            wrapped.push(segment.to_string());
            continue;
        }

        let words: Vec<&str> = segment.split(' ').collect();
        let mut current = String::new();
        for (index, word) in words.iter().enumerate() {
            let test = if current.is_empty() {
                (*word).to_string()
            } else {
                format!("{current} {word}")
            };

            if test.chars().count() <= width {
                current = test;
            } else {
                if !current.is_empty() {
                    wrapped.push(std::mem::take(&mut current));
                }
                current = (*word).to_string();
            }
            if index == words.len() - 1 && !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
            }
        }
    }

    wrapped.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(wrap_text_at("", 37), "");
    }

    #[test]
    fn short_lines_pass_through_unchanged() {
        let text = "Hello there";
        assert_eq!(wrap_text_at(text, 37), text);
    }

    #[test]
    fn short_lines_keep_internal_spacing() {
        // Segments within the width bypass tokenization entirely, so runs
        // of spaces survive untouched. Longer segments re-tokenize on
        // single spaces; double spaces become empty tokens that rejoin as
        // a space apiece. Exported content relies on both behaviors.
        assert_eq!(wrap_text_at("a  b", 10), "a  b");
        assert_eq!(wrap_text_at("aaaa  bbbb cccc", 10), "aaaa  bbbb\ncccc");
    }

    #[test]
    fn greedy_packing_at_width() {
        assert_eq!(wrap_text_at("Hello there traveler", 10), "Hello\nthere\ntraveler");
        assert_eq!(wrap_text_at("one two three four", 9), "one two\nthree\nfour");
    }

    #[test]
    fn words_are_never_split() {
        let wrapped = wrap_text_at("incomprehensibilities yes", 10);
        assert_eq!(wrapped, "incomprehensibilities\nyes");
    }

    #[test]
    fn paragraphs_wrap_independently() {
        let text = "first paragraph goes here\nsecond one";
        assert_eq!(wrap_text_at(text, 16), "first paragraph\ngoes here\nsecond one");
    }

    #[test]
    fn wrapping_short_input_is_idempotent() {
        let text = "short\nlines\nonly";
        assert_eq!(wrap_text_at(text, 10), text);
        assert_eq!(wrap_text_at(&wrap_text_at(text, 10), 10), text);
    }

    #[test]
    fn every_input_word_appears_intact() {
        let text = "the quick brown fox jumps over the lazy dog";
        let wrapped = wrap_text_at(text, 12);
        for word in text.split(' ') {
            assert!(
                wrapped.split_whitespace().any(|w| w == word),
                "word '{word}' lost in wrap"
            );
        }
    }

    #[test]
    fn deterministic() {
        let text = "some reasonably long dialogue text that needs wrapping";
        assert_eq!(wrap_text_at(text, 15), wrap_text_at(text, 15));
    }
}
