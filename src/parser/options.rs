//! Parsing options and configuration.

/// Default limit on node nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for building a document from JSON.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Maximum node nesting depth (top-level nodes are at depth 0)
    pub max_depth: usize,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable strict mode (fail on the first malformed node).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable lenient mode (skip malformed nodes).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Error handling mode while building the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first malformed node
    #[default]
    Strict,
    /// Skip malformed nodes and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().lenient().with_max_depth(32);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.max_depth, 32);

        let options = options.strict();
        assert_eq!(options.error_mode, ErrorMode::Strict);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }
}
