use crate::{
    error::{LayoutError, Result},
    metrics::{GlyphMetricsProvider, REFERENCE_GLYPH},
};

/// Font sizes above this are never probed.
pub const MAX_FONT_SIZE: u32 = 4096;

/// Picks a monospace font size from the canvas width.
///
/// The chosen size is the largest one at which `reference_columns` copies of
/// the reference glyph still fit into the canvas width, but never smaller than
/// `min_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSizeSolver {
    pub reference_columns: u32,
    pub min_size: u32,
    /// Size the search starts from.
    pub seed_size: u32,
}

impl Default for FontSizeSolver {
    fn default() -> Self {
        Self {
            reference_columns: 80,
            min_size: 12,
            seed_size: 20,
        }
    }
}

impl FontSizeSolver {
    pub fn solve(&self, provider: &impl GlyphMetricsProvider, image_width: i32) -> Result<u32> {
        if image_width <= 0 {
            return Err(LayoutError::geometry(format!(
                "canvas width {image_width} is not positive"
            )));
        }

        let columns = i64::from(self.reference_columns);
        let fits = |size: u32| -> Result<bool> {
            let width = provider.glyph_metrics(REFERENCE_GLYPH, size)?.advance_width;
            Ok(i64::from(width) * columns <= i64::from(image_width))
        };

        // Bracket the boundary so that `lo` fits (or is 0) and `hi` does not,
        // then bisect. Glyph advances never shrink as the size grows.
        let seed = self.seed_size.clamp(1, MAX_FONT_SIZE);
        let (mut lo, mut hi) = if fits(seed)? {
            let mut lo = seed;
            let mut hi = seed.saturating_mul(2).min(MAX_FONT_SIZE);
            while lo < MAX_FONT_SIZE && fits(hi)? {
                lo = hi;
                hi = hi.saturating_mul(2).min(MAX_FONT_SIZE);
            }
            (lo, hi)
        } else {
            let mut hi = seed;
            let mut lo = seed / 2;
            while lo > 0 && !fits(lo)? {
                hi = lo;
                lo /= 2;
            }
            (lo, hi)
        };

        if lo == MAX_FONT_SIZE {
            hi = lo;
        }
        while hi > lo + 1 {
            let mid = lo + (hi - lo) / 2;
            if fits(mid)? {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let size = lo.max(self.min_size);
        // tiny sizes may round down to nothing, the chosen one may not
        let advance = provider.glyph_metrics(REFERENCE_GLYPH, size)?.advance_width;
        if advance <= 0 {
            return Err(LayoutError::geometry(format!(
                "reference glyph {REFERENCE_GLYPH:?} has no advance at font size {size}"
            )));
        }
        log::debug!(
            "font size {} puts {} columns into {}px",
            size,
            self.reference_columns,
            image_width
        );
        Ok(size)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::metrics::testing::FixedPitch;

    fn column_width(provider: &FixedPitch, size: u32) -> i32 {
        provider
            .glyph_metrics(REFERENCE_GLYPH, size)
            .unwrap()
            .advance_width
            * 80
    }

    #[test]
    fn test_solve_800px_boundary() {
        let provider = FixedPitch::new(0.6, 1.2);
        let size = FontSizeSolver::default().solve(&provider, 800).unwrap();
        assert_eq!(size, 18);
        assert!(column_width(&provider, size) <= 800);
        assert!(column_width(&provider, size + 1) > 800);
    }

    #[test]
    fn test_solve_floors_at_min_size() {
        let provider = FixedPitch::new(0.6, 1.2);
        let size = FontSizeSolver::default().solve(&provider, 100).unwrap();
        assert_eq!(size, 12);
    }

    #[test]
    fn test_solve_independent_of_seed() {
        let provider = FixedPitch::new(0.5, 1.0);
        for seed in [1, 7, 20, 300, 5000] {
            let solver = FontSizeSolver {
                seed_size: seed,
                ..Default::default()
            };
            // 80 * floor(size / 2) <= 4000 => size <= 101
            assert_eq!(solver.solve(&provider, 4000).unwrap(), 101, "seed {seed}");
        }
    }

    #[test]
    fn test_solve_wide_canvas() {
        let provider = FixedPitch::new(0.5, 1.0);
        let size = FontSizeSolver::default().solve(&provider, 1920).unwrap();
        assert!(column_width(&provider, size) <= 1920);
        assert!(column_width(&provider, size + 1) > 1920);
    }

    #[test]
    fn test_solve_rejects_zero_width_glyphs() {
        let provider = FixedPitch::new(0.0, 1.0);
        let err = FontSizeSolver::default().solve(&provider, 800).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidZoneGeometry { .. }));
    }

    #[test]
    fn test_solve_rejects_non_positive_width() {
        let provider = FixedPitch::new(0.6, 1.2);
        let err = FontSizeSolver::default().solve(&provider, 0).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidZoneGeometry { .. }));
    }

    #[test]
    fn test_solve_propagates_missing_glyph() {
        let mut provider = FixedPitch::new(0.6, 1.2);
        provider.missing.push(REFERENCE_GLYPH);
        let err = FontSizeSolver::default().solve(&provider, 800).unwrap_err();
        assert!(matches!(err, LayoutError::MetricsUnavailable { .. }));
    }
}
