//! Integer point coordinates used by the shape DSL.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The largest coordinate (and largest circle radius) a terminal shape may
/// use. Keeping this small is what keeps terminal enumeration tractable --
/// it is `O(MAX_COORD^4)` rectangles/triangles alone.
pub const MAX_COORD: i32 = 20;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Every `Coord` with both components in `0..=MAX_COORD`, in
    /// lexicographic order (x-major, then y) -- the order §4.4 requires
    /// terminal enumeration to be stable under.
    pub fn grid() -> impl Iterator<Item = Coord> {
        (0..=MAX_COORD).flat_map(|x| (0..=MAX_COORD).map(move |y| Coord::new(x, y)))
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
