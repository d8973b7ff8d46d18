use crate::{
    error::Result,
    font_size::FontSizeSolver,
    geometry::Rect,
    metrics::{FontMetrics, GlyphMetricsProvider},
    positioner::{TextPositioner, WorkMode},
    zone::TextZone,
};

/// Padding added below every zone created by the composer.
pub const DEFAULT_TEXT_SPACE: i32 = 5;

/// Height of a row appended with [`ZoneComposer::append_text_row`].
pub const DEFAULT_ROW_HEIGHT: i32 = 50;

/// Result of a layout job, ready to be handed to a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    /// Placed zones, each with its final rectangle and rows.
    pub zones: Vec<TextZone>,
    pub font_size: u32,
    /// Height of the area the zones occupy, i.e. how much a canvas has to grow
    /// to show them below existing content.
    pub extension_height: i32,
}

/// One layout job: a canvas width, a font, and the zones to place on it.
///
/// The font size is chosen from the canvas width when the job is created and
/// the font metrics are captured once, so the same provider can be used for
/// other jobs afterwards.
pub struct ZoneComposer<P> {
    provider: P,
    image_width: i32,
    metrics: FontMetrics,
    work_mode: WorkMode,
    zones: Vec<TextZone>,
}

impl<P: GlyphMetricsProvider> ZoneComposer<P> {
    /// Creates a job for a canvas `image_width` pixels wide.
    pub fn new(provider: P, image_width: i32) -> Result<Self> {
        let font_size = FontSizeSolver::default().solve(&provider, image_width)?;
        let metrics = FontMetrics::capture(&provider, font_size)?;
        Ok(Self {
            provider,
            image_width,
            metrics,
            work_mode: WorkMode::default(),
            zones: Vec::new(),
        })
    }

    /// Uses `font_size` instead of the solved size.
    pub fn with_font_size(mut self, font_size: u32) -> Result<Self> {
        self.metrics = FontMetrics::capture(&self.provider, font_size)?;
        Ok(self)
    }

    pub fn with_work_mode(mut self, work_mode: WorkMode) -> Self {
        self.work_mode = work_mode;
        self
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn zones(&self) -> &[TextZone] {
        &self.zones
    }

    /// Adds a zone at an explicit position.
    pub fn append_text_zone(&mut self, rect: Rect, text: impl Into<String>) {
        self.zones.push(TextZone::new(text, rect, DEFAULT_TEXT_SPACE));
    }

    /// Adds a zone from raw bytes, which must be valid UTF-8.
    pub fn append_text_zone_bytes(&mut self, rect: Rect, bytes: &[u8]) -> Result<()> {
        let zone = TextZone::from_utf8(bytes, rect, DEFAULT_TEXT_SPACE)?;
        self.zones.push(zone);
        Ok(())
    }

    /// Adds a full-width row below the zones already added.
    ///
    /// Rows are meant to be used on their own; mixing them with explicitly
    /// placed zones stacks rows by zone count, not by position.
    pub fn append_text_row(&mut self, text: impl Into<String>) {
        let y = DEFAULT_ROW_HEIGHT * self.zones.len() as i32;
        let rect = Rect::new(0, y, self.image_width, DEFAULT_ROW_HEIGHT);
        self.append_text_zone(rect, text);
    }

    pub fn clear(&mut self) {
        self.zones.clear();
    }

    /// Places all zones and hands them out. The composer is empty afterwards.
    pub fn compose(&mut self) -> Result<Composition> {
        let mut zones = std::mem::take(&mut self.zones);
        TextPositioner::new(self.image_width)
            .with_work_mode(self.work_mode)
            .place(&mut zones, &self.metrics)?;

        let rects: Vec<Rect> = zones.iter().map(TextZone::rect).collect();
        let extension_height = Rect::bounding_box(&rects).map_or(0, |bbox| bbox.height);

        log::debug!(
            "composed {} zones at font size {}, canvas grows by {}px",
            zones.len(),
            self.metrics.font_size,
            extension_height
        );

        Ok(Composition {
            zones,
            font_size: self.metrics.font_size,
            extension_height,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{error::LayoutError, metrics::testing::FixedPitch};

    fn composer(image_width: i32) -> ZoneComposer<FixedPitch> {
        ZoneComposer::new(FixedPitch::new(0.5, 1.0), image_width).unwrap()
    }

    #[test]
    fn test_new_solves_font_size() {
        // 80 * floor(size / 2) <= 800 => size <= 21
        let c = composer(800);
        assert_eq!(
            *c.metrics(),
            FontMetrics {
                font_size: 21,
                symbol_width: 10,
                symbol_height: 21,
            }
        );
    }

    #[test]
    fn test_rows_are_stacked() {
        let mut c = composer(800).with_font_size(20).unwrap();
        c.append_text_row("first row");
        c.append_text_row("second row");
        assert_eq!(c.zones()[0].rect(), Rect::new(0, 0, 800, 50));
        assert_eq!(c.zones()[1].rect(), Rect::new(0, 50, 800, 50));

        let composition = c.compose().unwrap();
        assert!(c.zones().is_empty());
        assert_eq!(composition.font_size, 20);

        // 20px lines plus 5px text space, packed from the top
        let rects: Vec<Rect> = composition.zones.iter().map(TextZone::rect).collect();
        assert_eq!(rects, vec![Rect::new(0, 0, 800, 25), Rect::new(0, 25, 800, 25)]);
        assert_eq!(composition.extension_height, 50);
        assert_eq!(composition.zones[1].rows(), &["second row".to_string()]);
    }

    #[test]
    fn test_long_row_wraps() {
        let mut c = composer(100).with_font_size(20).unwrap();
        c.append_text_row("aaaa bbbb cccc dddd eeee ffff");
        let composition = c.compose().unwrap();
        let zone = &composition.zones[0];
        // 100px / 10px = 10 columns
        assert_eq!(
            zone.rows(),
            &["aaaa bbbb".to_string(), "cccc dddd".into(), "eeee ffff".into()]
        );
        assert_eq!(zone.rect().height, 3 * 20 + DEFAULT_TEXT_SPACE);
    }

    #[test]
    fn test_invalid_bytes_are_reported() {
        let mut c = composer(800);
        let err = c
            .append_text_zone_bytes(Rect::new(0, 0, 100, 50), &[0xc3, 0x28])
            .unwrap_err();
        assert!(matches!(err, LayoutError::EncodingError { .. }));
        assert!(c.zones().is_empty());
    }

    #[test]
    fn test_compose_without_zones() {
        let mut c = composer(800);
        assert!(matches!(c.compose().unwrap_err(), LayoutError::NoZones));
    }
}
