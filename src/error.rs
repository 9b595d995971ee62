//! Structured error types for the label engine.
//!
//! Conversion and layout errors (`InvalidResolution`, `InvalidSpan`) indicate
//! a malformed template and should surface at template-authoring/test time.
//! `SurfaceCreationFailed` is a runtime condition reported to the caller for
//! retry. An unknown template id is *not* an error: the registry resolves it
//! to the first registered template (see [`crate::template::TemplateRegistry`]).

use crate::layout::Span;
use thiserror::Error;

/// The unified error type returned by the public API.
#[derive(Debug, Error)]
pub enum LabelError {
    /// The requested print resolution is not one of the supported values.
    #[error("unsupported print resolution: {0} dpi (supported: 150, 200, 300, 600)")]
    InvalidResolution(u32),

    /// A grid span is empty, inverted, or reaches outside the grid.
    #[error("invalid grid span {span}: {reason}")]
    InvalidSpan {
        span: Span,
        reason: &'static str,
    },

    /// A rendering surface could not be allocated for a print job.
    #[error("failed to create rendering surface: {0}")]
    SurfaceCreationFailed(String),
}
