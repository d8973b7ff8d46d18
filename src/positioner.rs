use crate::{
    error::{LayoutError, Result},
    geometry::Rect,
    metrics::FontMetrics,
    zone::TextZone,
};

/// Overlap width, relative to the base zone width, above which a collision is
/// resolved by moving the other zone vertically instead of sideways.
const VERTICAL_RESOLVE_RATIO: f64 = 2.5;

/// Gap left between a base zone and a zone pushed away from it.
const COLLISION_GAP: i32 = 1;

/// Selects which stages [`TextPositioner::place`] runs.
///
/// Only [`WorkMode::default`] is a tested combination. Switching one of its
/// stages off is allowed; the X-axis stages are reserved and rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkMode {
    /// Pull zones up to close vertical gaps.
    pub remove_empty_space_y: bool,
    /// Reserved.
    pub remove_empty_space_x: bool,
    /// Scale all zones uniformly so they span the canvas width.
    pub scale_y: bool,
    /// Reserved.
    pub scale_x: bool,
    /// Push overlapping zones apart, before and after wrapping.
    pub no_intersections: bool,
    /// Make each zone exactly as tall as its wrapped rows.
    pub fit_height: bool,
}

impl Default for WorkMode {
    fn default() -> Self {
        Self {
            remove_empty_space_y: true,
            remove_empty_space_x: false,
            scale_y: true,
            scale_x: false,
            no_intersections: true,
            fit_height: true,
        }
    }
}

impl WorkMode {
    pub fn is_tested(&self) -> bool {
        *self == Self::default()
    }

    fn has_reserved_stage(&self) -> bool {
        self.remove_empty_space_x || self.scale_x
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
}

/// Which way `other` is pushed when it collides with `base` and the overlap is
/// resolved vertically.
///
/// This compares `base.x` with `other.y`, mixing axes. It is unclear whether
/// that is deliberate, so the rule is kept and isolated here.
pub fn vertical_direction(base: &Rect, other: &Rect) -> VerticalDirection {
    if base.x - other.y > 0 {
        VerticalDirection::Up
    } else {
        VerticalDirection::Down
    }
}

/// Which way `other` is pushed when it collides with `base` and the overlap is
/// resolved horizontally.
pub fn horizontal_direction(base: &Rect, other: &Rect) -> HorizontalDirection {
    if base.x - other.x > 0 {
        HorizontalDirection::Left
    } else {
        HorizontalDirection::Right
    }
}

/// Arranges text zones over a canvas of fixed width.
///
/// [`TextPositioner::place`] runs a fixed pipeline, each stage a full pass
/// over the zones:
/// 1. push overlapping zones apart,
/// 2. scale everything so the zones' bounding box spans the canvas width,
/// 3. wrap the text of every zone,
/// 4. push zones apart again, since wrapping changes heights,
/// 5. pull zones up to remove vertical gaps.
#[derive(Clone, Debug)]
pub struct TextPositioner {
    image_width: i32,
    work_mode: WorkMode,
}

impl TextPositioner {
    pub fn new(image_width: i32) -> Self {
        Self {
            image_width,
            work_mode: WorkMode::default(),
        }
    }

    pub fn with_work_mode(mut self, work_mode: WorkMode) -> Self {
        self.work_mode = work_mode;
        self
    }

    pub fn image_width(&self) -> i32 {
        self.image_width
    }

    pub fn work_mode(&self) -> WorkMode {
        self.work_mode
    }

    /// Places and wraps `zones` in place.
    ///
    /// On error the zones may already be partially moved or wrapped and
    /// should be discarded.
    pub fn place(&self, zones: &mut [TextZone], metrics: &FontMetrics) -> Result<()> {
        let mode = self.work_mode;
        if mode.has_reserved_stage() {
            return Err(LayoutError::UnsupportedWorkMode(mode));
        }
        if zones.is_empty() {
            return Err(LayoutError::NoZones);
        }
        if !mode.is_tested() {
            log::warn!("placing text zones with untested work mode {:?}", mode);
        }

        if mode.no_intersections {
            remove_intersections(zones);
        }

        if mode.scale_y {
            self.scale_to_canvas(zones)?;
        }

        for zone in zones.iter_mut() {
            zone.wrap(metrics, mode.fit_height)?;
        }

        if mode.fit_height && mode.no_intersections {
            remove_intersections(zones);
        }

        if mode.remove_empty_space_y {
            remove_vertical_space(zones);
        }

        Ok(())
    }

    /// Scales all zones by the same factor so their bounding box is as wide as
    /// the canvas. Returns the factor.
    pub fn scale_to_canvas(&self, zones: &mut [TextZone]) -> Result<f64> {
        let rects: Vec<Rect> = zones.iter().map(TextZone::rect).collect();
        let bbox = Rect::bounding_box(&rects).ok_or(LayoutError::NoZones)?;
        if bbox.width <= 0 {
            return Err(LayoutError::geometry(format!(
                "zones span no width, bounding box {bbox:?}"
            )));
        }
        if self.image_width <= 0 {
            return Err(LayoutError::geometry(format!(
                "canvas width {} is not positive",
                self.image_width
            )));
        }

        let factor = f64::from(self.image_width) / f64::from(bbox.width);
        for zone in zones.iter_mut() {
            zone.scale(factor);
        }
        log::debug!(
            "scaled {} zones by {:.4} to {}px",
            zones.len(),
            factor,
            self.image_width
        );
        Ok(factor)
    }
}

/// Zone indices by ascending `y`, ties kept in collection order.
fn order_by_y(zones: &[TextZone]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..zones.len()).collect();
    order.sort_by_key(|&i| zones[i].rect().y);
    order
}

/// Pushes overlapping zones apart in a single pass.
///
/// Zones are visited top to bottom; each one in turn is the base and stays
/// where it is, while every other zone it overlaps is moved flush against one
/// of its edges. Wide overlaps move the other zone above or below the base,
/// narrow ones move it to the side.
///
/// The pass is not repeated: a zone moved away from one base can land on a
/// zone that was a base earlier.
pub fn remove_intersections(zones: &mut [TextZone]) {
    for base_idx in order_by_y(zones) {
        let base = zones[base_idx].rect();

        for i in 0..zones.len() {
            if i == base_idx {
                continue;
            }

            let other = zones[i].rect();
            let Some(overlap) = base.intersection(&other) else {
                continue;
            };

            let wide = f64::from(overlap.width) >= f64::from(base.width) / VERTICAL_RESOLVE_RATIO;
            let (x, y) = if wide {
                let y = match vertical_direction(&base, &other) {
                    VerticalDirection::Up => base.y - other.height - COLLISION_GAP,
                    VerticalDirection::Down => base.bottom() + COLLISION_GAP,
                };
                (other.x, y)
            } else {
                let x = match horizontal_direction(&base, &other) {
                    HorizontalDirection::Left => base.x - other.width - COLLISION_GAP,
                    HorizontalDirection::Right => base.right() + COLLISION_GAP,
                };
                (x, other.y)
            };

            log::debug!(
                "zone {} overlaps zone {} by {:?}, moved to ({}, {})",
                i,
                base_idx,
                overlap,
                x,
                y
            );
            zones[i].move_to(x, y);
        }
    }
}

/// Pulls every zone up as far as the zones above it in its column allow.
///
/// Zones are visited top to bottom (by their position when the pass starts),
/// so a zone sees the ones above it already moved. A zone never moves above
/// the canvas top. One that collision removal pushed above it is moved down
/// toward the top instead, stopping at the nearest zone below it in its column.
pub fn remove_vertical_space(zones: &mut [TextZone]) {
    for base_idx in order_by_y(zones) {
        let base = zones[base_idx].rect();
        let column = Rect::new(base.x, 0, base.width, i32::MAX - 1);

        let mut movable = base.y;
        for (i, zone) in zones.iter().enumerate() {
            if i == base_idx {
                continue;
            }
            let Some(clipped) = zone.rect().intersection(&column) else {
                continue;
            };
            let distance = base.y - clipped.bottom();
            if distance >= 0 {
                movable = movable.min(distance);
            }
        }

        if movable < 0 {
            movable = -room_below(zones, base_idx).min(-movable);
        }
        if movable != 0 {
            zones[base_idx].shift(0, -movable);
        }
    }
}

/// Free space between a zone's bottom and the nearest zone under it that
/// shares its column.
fn room_below(zones: &[TextZone], base_idx: usize) -> i32 {
    let base = zones[base_idx].rect();
    let below = Rect::new(
        base.x,
        base.bottom(),
        base.width,
        i32::MAX - 1 - base.bottom().max(0),
    );

    zones
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != base_idx)
        .filter_map(|(_, zone)| zone.rect().intersection(&below))
        .map(|clipped| clipped.y - base.bottom())
        .min()
        .unwrap_or(i32::MAX)
}
