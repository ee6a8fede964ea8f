//! Token cleanup: make raw text safe inside an HTML-like DOT label.

/// Substrings that mark a value as empty when skip-empty mode is on.
const EMPTY_MARKERS: [&str; 2] = ["false", "--"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer {
    skip_empty: bool,
}

impl Sanitizer {
    pub fn new(skip_empty: bool) -> Self {
        Self { skip_empty }
    }

    /// Clean a raw token.
    ///
    /// Returns `None` when the token is suppressed, which is different from
    /// `Some("")`: an empty value still occupies a row.
    pub fn clean(&self, raw: &str) -> Option<String> {
        let mut text: String = raw
            .chars()
            .map(|c| match c {
                '"' => ' ',
                '<' | '>' => '-',
                other => other,
            })
            .collect();

        // A dump truncated inside a parenthesised list leaves a dangling `(`.
        if !text.contains(')') {
            if let Some(pos) = text.find('(') {
                text.replace_range(pos..pos + 1, " ");
            }
        }

        if self.skip_empty && EMPTY_MARKERS.iter().any(|marker| text.contains(marker)) {
            return None;
        }
        Some(text)
    }
}
