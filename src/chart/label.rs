//! Formatted diagram labels
//!
//! Mermaid collapses raw newlines inside labels, so line breaks are always
//! rendered as [`LINE_BREAK`]. All label text goes through [`Label`] so the
//! substitution happens in exactly one place.

use std::fmt;

/// Line-break marker understood by the renderer
pub const LINE_BREAK: &str = "<br/>";

/// Label text split into display lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    lines: Vec<String>,
}

impl Label {
    /// Label from free text; embedded newlines become separate lines
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(escape).collect(),
        }
    }

    /// Label from explicit lines
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: lines
                .into_iter()
                .flat_map(|line| line.as_ref().lines().map(escape).collect::<Vec<_>>())
                .collect(),
        }
    }

    /// Whether there is no text at all
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join(LINE_BREAK))
    }
}

/// Replace characters that terminate a quoted node label or a `|...|` edge label
fn escape(line: &str) -> String {
    line.replace('\r', "")
        .replace('"', "#quot;")
        .replace('|', "#124;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newlines_become_markers() {
        let label = Label::new("first\nsecond\r\nthird");
        assert_eq!(label.to_string(), "first<br/>second<br/>third");
    }

    #[test]
    fn test_explicit_lines() {
        let label = Label::lines(["Fix failing checks", "and resolve comments"]);
        assert_eq!(label.to_string(), "Fix failing checks<br/>and resolve comments");
    }

    #[test]
    fn test_label_breaking_characters_are_escaped() {
        let label = Label::new(r#"lint | "strict""#);
        assert_eq!(label.to_string(), "lint #124; #quot;strict#quot;");
    }

    #[test]
    fn test_empty_label() {
        assert!(Label::new("").is_empty());
        assert!(!Label::new("x").is_empty());
    }
}
