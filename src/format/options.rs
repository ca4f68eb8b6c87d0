//! Formatting options and token syntax.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default token prefix.
pub const DEFAULT_PREFIX: &str = "{{";
/// Default token postfix.
pub const DEFAULT_POSTFIX: &str = "}}";

/// Delimiters and length limits for placeholder tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSyntax {
    /// Opening delimiter
    pub prefix: String,

    /// Closing delimiter
    pub postfix: String,

    /// Minimum number of name characters between the delimiters
    pub min_name_len: usize,

    /// Maximum length of the whole token, delimiters included
    pub max_len: usize,
}

impl TokenSyntax {
    /// Create the default `{{name}}` syntax.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the opening delimiter.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the closing delimiter.
    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    /// Set the maximum token length.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Minimum length of a whole token.
    pub fn min_len(&self) -> usize {
        self.min_name_len + self.prefix.chars().count() + self.postfix.chars().count()
    }

    /// Wrap a bare name in the delimiters.
    pub fn wrap(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, name, self.postfix)
    }

    /// Unanchored pattern matching any well-formed token.
    pub fn pattern(&self) -> Result<Regex> {
        self.compile(&format!(
            "{}[a-zA-Z_-]+{}",
            regex::escape(&self.prefix),
            regex::escape(&self.postfix)
        ))
    }

    /// Check a token against the delimiters, the allowed name characters
    /// (ASCII letters, `-` and `_`) and the length limits.
    pub fn validate(&self, token: &str) -> Result<()> {
        let invalid = |reason: String| Error::InvalidToken {
            token: token.to_string(),
            reason,
        };

        if token.is_empty() {
            return Err(invalid("token is empty".to_string()));
        }

        let len = token.chars().count();
        if len < self.min_len() {
            return Err(invalid(format!(
                "shorter than {} characters",
                self.min_len()
            )));
        }
        if len > self.max_len {
            return Err(invalid(format!("longer than {} characters", self.max_len)));
        }

        let anchored = self.compile(&format!(
            r"\A{}[a-zA-Z_-]+{}\z",
            regex::escape(&self.prefix),
            regex::escape(&self.postfix)
        ))?;
        if !anchored.is_match(token) {
            return Err(invalid(format!(
                "may contain only letters, '-' and '_' between '{}' and '{}'",
                self.prefix, self.postfix
            )));
        }

        Ok(())
    }

    /// Check if a token is valid under this syntax.
    pub fn is_valid(&self, token: &str) -> bool {
        self.validate(token).is_ok()
    }

    fn compile(&self, pattern: &str) -> Result<Regex> {
        Regex::new(pattern).map_err(|e| Error::Other(format!("token pattern: {}", e)))
    }
}

impl Default for TokenSyntax {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            postfix: DEFAULT_POSTFIX.to_string(),
            min_name_len: 3,
            max_len: 70,
        }
    }
}

/// Options for formatting documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Token syntax used for validation and discovery
    pub syntax: TokenSyntax,

    /// Reject substitutions whose token fails [`TokenSyntax::validate`]
    pub strict_tokens: bool,

    /// Whether package formatting runs documents in parallel
    pub parallel: bool,

    /// Cap on replacements of one token within one paragraph
    pub max_replacements: usize,
}

impl FormatOptions {
    /// Create new format options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token syntax.
    pub fn with_syntax(mut self, syntax: TokenSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Validate every token before formatting.
    pub fn strict(mut self) -> Self {
        self.strict_tokens = true;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the per-paragraph replacement cap.
    pub fn with_max_replacements(mut self, limit: usize) -> Self {
        self.max_replacements = limit;
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            syntax: TokenSyntax::default(),
            strict_tokens: false,
            parallel: true,
            max_replacements: 10_000,
        }
    }
}
