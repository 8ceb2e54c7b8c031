use std::fmt;

/// Program stage a diagnostic belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Fatal start-up failures.
///
/// Each of these stops the system before the first frame; none is retried.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The named drawable does not exist or no GPU drawing context could be obtained.
    #[error("surface `{id}` is unavailable: {reason}")]
    SurfaceUnavailable { id: String, reason: String },

    /// A program stage failed to parse or validate.
    #[error("{stage} stage failed to compile:\n{diagnostic}")]
    Compile {
        stage: ShaderStage,
        diagnostic: String,
    },

    /// Both stages compiled but do not form a usable program.
    #[error("program failed to link: {diagnostic}")]
    Link { diagnostic: String },
}

impl SetupError {
    pub(crate) fn surface_unavailable(id: &str, reason: impl Into<String>) -> Self {
        Self::SurfaceUnavailable {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn link(diagnostic: impl Into<String>) -> Self {
        Self::Link {
            diagnostic: diagnostic.into(),
        }
    }
}
