//! Greedy word wrapping by character count.
//!
//! Card text is set in fonts whose width is estimated from a single
//! width-to-height ratio, so a line is measured in characters.

/// Options for [`wrap`]. Indents count toward the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions<'a> {
    pub width: usize,
    pub initial_indent: &'a str,
    pub subsequent_indent: &'a str,
}

impl<'a> WrapOptions<'a> {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            initial_indent: "",
            subsequent_indent: "",
        }
    }

    pub fn indents(mut self, initial: &'a str, subsequent: &'a str) -> Self {
        self.initial_indent = initial;
        self.subsequent_indent = subsequent;
        self
    }
}

/// The number of characters that fit in `interior_width`, never less
/// than one.
pub fn characters_per_line(interior_width: f64, character_width: f64) -> usize {
    if character_width <= 0.0 {
        return 1;
    }
    ((interior_width / character_width).floor() as usize).max(1)
}

/// Runs of whitespace and of everything else, with each whitespace
/// character turned into a plain space.
fn chunks(text: &str) -> Vec<Vec<char>> {
    let mut chunks: Vec<Vec<char>> = Vec::new();
    let mut in_space = None;
    for c in text.chars() {
        let space = c.is_whitespace();
        let c = if space { ' ' } else { c };
        match chunks.last_mut() {
            Some(chunk) if in_space == Some(space) => chunk.push(c),
            _ => chunks.push(vec![c]),
        }
        in_space = Some(space);
    }
    chunks
}

fn is_space(chunk: &[char]) -> bool {
    chunk.iter().all(|&c| c == ' ')
}

/// Wrap `text` into lines of at most `options.width` characters.
///
/// Whitespace at line breaks is dropped, except at the very start of the
/// text. Words too long for a line are broken. Text with no words gives
/// no lines.
pub fn wrap(text: &str, options: &WrapOptions<'_>) -> Vec<String> {
    let mut pending = chunks(text);
    pending.reverse();
    let mut lines: Vec<String> = Vec::new();

    while !pending.is_empty() {
        let indent = if lines.is_empty() {
            options.initial_indent
        } else {
            options.subsequent_indent
        };
        let width = options.width.saturating_sub(indent.chars().count()).max(1);

        if !lines.is_empty() && pending.last().is_some_and(|c| is_space(c)) {
            pending.pop();
        }

        let mut line: Vec<Vec<char>> = Vec::new();
        let mut length = 0;
        while let Some(chunk) = pending.last() {
            if length + chunk.len() > width {
                break;
            }
            length += chunk.len();
            line.extend(pending.pop());
        }

        if let Some(chunk) = pending.last_mut() {
            if chunk.len() > width {
                let space_left = width.saturating_sub(length).max(1);
                let rest = chunk.split_off(space_left.min(chunk.len()));
                let head = std::mem::replace(chunk, rest);
                line.push(head);
            }
        }

        if line.last().is_some_and(|c| is_space(c)) {
            line.pop();
        }

        if !line.is_empty() {
            let body: String = line.into_iter().flatten().collect();
            lines.push(format!("{}{}", indent, body));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(text: &str, width: usize) -> Vec<String> {
        wrap(text, &WrapOptions::new(width))
    }

    #[test]
    fn test_empty_text_gives_no_lines() {
        assert!(w("", 10).is_empty());
        assert!(w("   \n ", 10).is_empty());
    }

    #[test]
    fn test_greedy_wrap() {
        assert_eq!(
            w("The quick brown fox jumps over the lazy dog", 10),
            vec!["The quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
        assert_eq!(w("Short.", 10), vec!["Short."]);
    }

    #[test]
    fn test_newlines_become_spaces() {
        assert_eq!(w("one\ntwo", 20), vec!["one two"]);
    }

    #[test]
    fn test_long_words_are_broken() {
        assert_eq!(w("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(w("a bcdefgh", 4), vec!["a bc", "defg", "h"]);
    }

    #[test]
    fn test_indents() {
        let options = WrapOptions::new(8).indents("* ", "  ");
        assert_eq!(wrap("one two three", &options), vec!["* one", "  two", "  three"]);
    }

    #[test]
    fn test_leading_space_is_kept() {
        assert_eq!(w("  indented text", 20), vec!["  indented text"]);
    }

    #[test]
    fn test_characters_per_line() {
        assert_eq!(characters_per_line(50.0, 2.0), 25);
        assert_eq!(characters_per_line(5.0, 2.0), 2);
        assert_eq!(characters_per_line(1.0, 2.0), 1);
        assert_eq!(characters_per_line(10.0, 0.0), 1);
    }
}
