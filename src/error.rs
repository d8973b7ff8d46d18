use thiserror::Error;

use crate::positioner::WorkMode;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// All errors that a layout job can produce.
///
/// Every variant is terminal for the call that returned it. Layout is a pure
/// computation over its inputs, so retrying with the same zones and metrics
/// reproduces the same error; callers fix the input and run again.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// A zone, the canvas, or the font metrics describe a degenerate geometry
    /// (zero width, zero glyph advance, empty bounding box, ...).
    #[error("invalid zone geometry: {reason}")]
    InvalidZoneGeometry { reason: String },

    /// The metrics provider has no glyph for `ch` at `font_size`.
    #[error("no metrics for glyph {ch:?} at font size {font_size}")]
    MetricsUnavailable { ch: char, font_size: u32 },

    /// No loaded font matches the request, so there is nothing to measure.
    #[error("font unavailable: {reason}")]
    FontUnavailable { reason: String },

    /// Input bytes are not valid UTF-8.
    #[error("cannot decode text {input:?} as UTF-8")]
    EncodingError {
        input: Vec<u8>,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The positioner was handed an empty zone collection.
    #[error("no text zones to place")]
    NoZones,

    /// `wrap` was called on a zone that already holds rows.
    #[error("text zone already wrapped into {rows} rows")]
    AlreadyWrapped { rows: usize },

    /// The work mode requests a stage that has no implementation.
    #[error("unsupported work mode: {0:?}")]
    UnsupportedWorkMode(WorkMode),

    #[error(transparent)]
    /// An I/O error occurred while loading a font
    Io(#[from] std::io::Error),
}

impl LayoutError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::InvalidZoneGeometry {
            reason: reason.into(),
        }
    }
}
