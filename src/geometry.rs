use euclid::{default::Box2D, point2};

/// Integer axis-aligned rectangle.
///
/// **Y-axis goes down**: `(x, y)` is the top-left corner, `bottom()` is
/// `y + height`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Overlapping area of two rectangles.
    ///
    /// Returns `None` when the overlap has no positive area, so rectangles that
    /// merely share an edge do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        self.to_box2d()
            .intersection(&other.to_box2d())
            .map(Self::from_box2d)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let (a, b) = (self.to_box2d(), other.to_box2d());
        Self::from_box2d(Box2D::new(a.min.min(b.min), a.max.max(b.max)))
    }

    /// Bounding box of all given rectangles, `None` for an empty input.
    pub fn bounding_box<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, rect| match acc {
                Some(bbox) => Some(bbox.union(rect)),
                None => Some(*rect),
            })
    }

    fn to_box2d(self) -> Box2D<i32> {
        Box2D::new(point2(self.x, self.y), point2(self.right(), self.bottom()))
    }

    fn from_box2d(b: Box2D<i32>) -> Self {
        Self::new(b.min.x, b.min.y, b.width(), b.height())
    }
}
