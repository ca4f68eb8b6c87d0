//! Literal token search over paragraph text.

/// Finds occurrences of one token by plain, case-sensitive substring search.
#[derive(Debug, Clone, Copy)]
pub struct TokenLocator<'a> {
    token: &'a str,
    len: usize,
}

impl<'a> TokenLocator<'a> {
    /// Create a locator for `token`.
    pub fn new(token: &'a str) -> Self {
        Self {
            token,
            len: token.chars().count(),
        }
    }

    /// The token being searched for.
    pub fn token(&self) -> &'a str {
        self.token
    }

    /// Token length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the token is empty. An empty token never matches.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Character position of the leftmost match starting at or after
    /// character `from`.
    pub fn find(&self, text: &str, from: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let start = byte_offset(text, from)?;
        let found = text[start..].find(self.token)?;
        Some(from + text[start..start + found].chars().count())
    }
}

/// Byte offset of character `char_index`, allowing one-past-the-end.
fn byte_offset(text: &str, char_index: usize) -> Option<usize> {
    text.char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(text.len()))
        .nth(char_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_leftmost() {
        let locator = TokenLocator::new("{{x}}");
        assert_eq!(locator.find("{{x}} and {{x}}", 0), Some(0));
        assert_eq!(locator.find("{{x}} and {{x}}", 1), Some(10));
        assert_eq!(locator.find("{{x}} and {{x}}", 11), None);
    }

    #[test]
    fn test_find_is_case_sensitive_and_literal() {
        let locator = TokenLocator::new("{{Name}}");
        assert_eq!(locator.find("{{name}}", 0), None);

        let locator = TokenLocator::new("a.c");
        assert_eq!(locator.find("abc a.c", 0), Some(4));
    }

    #[test]
    fn test_find_returns_character_positions() {
        let locator = TokenLocator::new("{{x}}");
        assert_eq!(locator.find("жжж {{x}}", 0), Some(4));
        assert_eq!(locator.find("жжж {{x}}", 2), Some(4));
    }

    #[test]
    fn test_find_past_end() {
        let locator = TokenLocator::new("a");
        assert_eq!(locator.find("ba", 2), None);
        assert_eq!(locator.find("ba", 10), None);
    }

    #[test]
    fn test_empty_token_never_matches() {
        let locator = TokenLocator::new("");
        assert!(locator.is_empty());
        assert_eq!(locator.find("anything", 0), None);
    }
}
