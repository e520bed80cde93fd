//! Compiler configuration.

/// Default maximum nesting depth.
///
/// At this depth the JSON form of a predicate nests well under the
/// 128-level recursion limit of common JSON readers.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default maximum number of tokens in a query.
pub const DEFAULT_MAX_TOKENS: usize = 4096;

/// Resource limits applied to every compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Maximum nesting depth.
    ///
    /// Bounds both the nesting of `(` and `NOT` in the text and the height
    /// of the parsed tree, where a chain of one connective (`a OR b OR c`)
    /// counts as a single level.
    pub max_depth: usize,
    /// Maximum number of tokens, end of input excluded; `None` for unbounded
    pub max_tokens: Option<usize>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

impl CompilerConfig {
    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum number of tokens
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Accept queries with any number of tokens.
    ///
    /// Long connective chains are long binary spines in memory, so only
    /// disable this when the caller bounds input size upstream.
    pub fn without_token_limit(mut self) -> Self {
        self.max_tokens = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_config_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.max_tokens, Some(4096));
    }

    #[test]
    fn test_compiler_config_builders() {
        let config = CompilerConfig::default()
            .with_max_depth(8)
            .with_max_tokens(256);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.max_tokens, Some(256));

        let unbounded = config.without_token_limit();
        assert_eq!(unbounded.max_tokens, None);
        assert_eq!(unbounded.max_depth, 8);
    }
}
