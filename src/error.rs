use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, RenderError>;

/// Failures surfaced by a render invocation.
///
/// None of these are retried: a render either completes or aborts, and a
/// partially written output must be treated as invalid by the caller.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The output destination could not be opened. Nothing was written.
    #[error("cannot open output {}: {source}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An I/O error after the sink was opened.
    #[error("write failed: {0}")]
    WriteFailure(#[from] io::Error),

    /// A draw call carried paint or stroke state outside the supported subset.
    #[error("unsupported paint: {0}")]
    UnsupportedPaint(String),

    #[error("document already closed")]
    AlreadyClosed,

    #[error("invalid diagram model: {0}")]
    InvalidModel(String),
}

impl RenderError {
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedPaint(message.into())
    }

    /// True when the failure happened before any output was produced.
    pub fn is_sink_unavailable(&self) -> bool {
        matches!(self, Self::SinkUnavailable { .. })
    }
}
