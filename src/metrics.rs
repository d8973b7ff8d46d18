use std::sync::Arc;

use crate::error::{LayoutError, Result};

/// Glyph used to measure monospace columns and line height.
pub const REFERENCE_GLYPH: char = 'w';

/// Advance metrics of a single glyph, in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Horizontal distance from this glyph's origin to the next one.
    pub advance_width: i32,
    /// Distance from one baseline to the next.
    pub vertical_advance: i32,
}

/// Source of glyph metrics for the layout engine.
///
/// Implemented for [`fontdue::Font`]; anything that can answer "how wide and
/// how tall is this glyph at this size" can drive a layout job.
pub trait GlyphMetricsProvider {
    fn glyph_metrics(&self, ch: char, font_size: u32) -> Result<GlyphMetrics>;
}

impl GlyphMetricsProvider for fontdue::Font {
    fn glyph_metrics(&self, ch: char, font_size: u32) -> Result<GlyphMetrics> {
        let unavailable = || LayoutError::MetricsUnavailable { ch, font_size };

        if self.lookup_glyph_index(ch) == 0 {
            return Err(unavailable());
        }

        let px = font_size as f32;
        let line_metrics = self.horizontal_line_metrics(px).ok_or_else(unavailable)?;
        let metrics = self.metrics(ch, px);

        // whole pixels, truncated the same way as 26.6 fixed point advances
        Ok(GlyphMetrics {
            advance_width: metrics.advance_width as i32,
            vertical_advance: line_metrics.new_line_size as i32,
        })
    }
}

impl<P: GlyphMetricsProvider + ?Sized> GlyphMetricsProvider for &P {
    fn glyph_metrics(&self, ch: char, font_size: u32) -> Result<GlyphMetrics> {
        (**self).glyph_metrics(ch, font_size)
    }
}

impl<P: GlyphMetricsProvider + ?Sized> GlyphMetricsProvider for Arc<P> {
    fn glyph_metrics(&self, ch: char, font_size: u32) -> Result<GlyphMetrics> {
        (**self).glyph_metrics(ch, font_size)
    }
}

/// Immutable snapshot of the font metrics a layout job runs with.
///
/// Captured once per job so that wrapping and positioning never depend on
/// font-size state held by a shared font handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontMetrics {
    pub font_size: u32,
    /// Advance of [`REFERENCE_GLYPH`].
    pub symbol_width: i32,
    /// Vertical advance of [`REFERENCE_GLYPH`].
    pub symbol_height: i32,
}

impl FontMetrics {
    /// Measures the reference glyph at `font_size`.
    pub fn capture(provider: &impl GlyphMetricsProvider, font_size: u32) -> Result<Self> {
        let glyph = provider.glyph_metrics(REFERENCE_GLYPH, font_size)?;
        Ok(Self {
            font_size,
            symbol_width: glyph.advance_width,
            symbol_height: glyph.vertical_advance,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Deterministic monospace provider: every glyph advances
    /// `font_size * width_ratio` pixels and lines are `font_size * height_ratio`
    /// pixels apart.
    pub struct FixedPitch {
        pub width_ratio: f32,
        pub height_ratio: f32,
        pub missing: Vec<char>,
    }

    impl FixedPitch {
        pub fn new(width_ratio: f32, height_ratio: f32) -> Self {
            Self {
                width_ratio,
                height_ratio,
                missing: Vec::new(),
            }
        }
    }

    impl GlyphMetricsProvider for FixedPitch {
        fn glyph_metrics(&self, ch: char, font_size: u32) -> Result<GlyphMetrics> {
            if self.missing.contains(&ch) {
                return Err(LayoutError::MetricsUnavailable { ch, font_size });
            }
            Ok(GlyphMetrics {
                advance_width: (font_size as f32 * self.width_ratio) as i32,
                vertical_advance: (font_size as f32 * self.height_ratio) as i32,
            })
        }
    }

    /// Snapshot with fixed symbol sizes, for tests that don't need a provider.
    pub fn metrics(symbol_width: i32, symbol_height: i32) -> FontMetrics {
        FontMetrics {
            font_size: 16,
            symbol_width,
            symbol_height,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::testing::FixedPitch;
    use super::*;

    #[test]
    fn test_capture_reads_reference_glyph() {
        let provider = FixedPitch::new(0.5, 1.25);
        let metrics = FontMetrics::capture(&provider, 20).expect("metrics");
        assert_eq!(
            metrics,
            FontMetrics {
                font_size: 20,
                symbol_width: 10,
                symbol_height: 25,
            }
        );
    }

    #[test]
    fn test_capture_missing_glyph() {
        let mut provider = FixedPitch::new(0.5, 1.25);
        provider.missing.push(REFERENCE_GLYPH);
        let err = FontMetrics::capture(&provider, 20).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::MetricsUnavailable {
                ch: REFERENCE_GLYPH,
                font_size: 20
            }
        ));
    }
}
