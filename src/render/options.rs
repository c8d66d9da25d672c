//! Rendering options and configuration.

/// Default URL scheme for attachment references.
pub const DEFAULT_ATTACHMENT_SCHEME: &str = "attachment:";

/// Options for rendering a document to Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix placed before a media id in image targets (e.g., "attachment:")
    pub attachment_scheme: String,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attachment scheme.
    pub fn with_attachment_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.attachment_scheme = scheme.into();
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            attachment_scheme: DEFAULT_ATTACHMENT_SCHEME.to_string(),
            max_heading_level: 6,
            collect_stats: false,
        }
    }
}
