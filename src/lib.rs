//! # Kumihan
//!
//! Text zone layout for monospace text over a canvas of fixed width.
//!
//! ## Overview
//!
//! A [`TextZone`] is a block of text bound to a rectangle. Wrapping splits the
//! text into rows that fit the rectangle's width and grows its height to hold
//! them. The [`TextPositioner`] arranges many zones on one canvas: it pushes
//! overlapping zones apart, scales everything to the canvas width, wraps every
//! zone and finally pulls zones up to close vertical gaps.
//!
//! Glyph metrics come from a [`GlyphMetricsProvider`], implemented for
//! [`fontdue::Font`]. Rendering the resulting rows is left to the caller.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kumihan::{FontSystem, Rect};
//!
//! // 1. Create a FontSystem and load fonts
//! let font_system = FontSystem::new();
//! font_system.load_system_fonts();
//!
//! // 2. Open a layout job for an 800px wide canvas
//! let mut composer = font_system.monospace_composer(800)?;
//!
//! // 3. Add text
//! composer.append_text_zone(Rect::new(0, 0, 200, 50), "aaaa bbbb");
//! composer.append_text_zone(Rect::new(10, 10, 200, 50), "cccc");
//!
//! // 4. Place and hand over to a renderer
//! let composition = composer.compose()?;
//! for zone in &composition.zones {
//!     println!("{:?}: {:?}", zone.rect(), zone.rows());
//! }
//! # Ok::<(), kumihan::LayoutError>(())
//! ```

pub mod composer;
pub mod error;
pub mod font_size;
pub mod font_storage;
pub mod font_system;
pub mod geometry;
pub mod metrics;
pub mod positioner;
pub mod zone;

// common re-exports
pub use composer::{Composition, ZoneComposer};
pub use error::{LayoutError, Result};
pub use font_size::FontSizeSolver;
pub use font_storage::FontStorage;
pub use font_system::FontSystem;
pub use geometry::Rect;
pub use metrics::{FontMetrics, GlyphMetrics, GlyphMetricsProvider};
pub use positioner::{TextPositioner, WorkMode};
pub use zone::TextZone;

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use parking_lot;
