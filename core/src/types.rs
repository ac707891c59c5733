use serde::{Deserialize, Serialize};

/// Single coordinate axis used for the side length and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Score values, the win bonus can push them below zero.
pub type Score = i32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Rounds a non-negative value half up, `core` has no `f64::round`.
pub(crate) fn round_half_up(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        (value + 0.5) as u32
    }
}

/// Axis-aligned rectangle of cells, both ends inclusive.
///
/// Used both for the clamped 3x3 neighborhood of a cell and for the dirty region handed to the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: Coord,
    pub right: Coord,
    pub top: Coord,
    pub bottom: Coord,
}

impl Region {
    pub const fn cell((x, y): Coord2) -> Self {
        Self {
            left: x,
            right: x,
            top: y,
            bottom: y,
        }
    }

    /// The whole square board of `side_length` cells per side.
    pub const fn full(side_length: Coord) -> Self {
        let last = side_length.saturating_sub(1);
        Self {
            left: 0,
            right: last,
            top: 0,
            bottom: last,
        }
    }

    /// Clamps `x-1..=x+1` and `y-1..=y+1` to `[0, side_length-1]`.
    pub const fn neighborhood((x, y): Coord2, side_length: Coord) -> Self {
        let last = side_length.saturating_sub(1);
        Self {
            left: x.saturating_sub(1),
            right: if x >= last { last } else { x + 1 },
            top: y.saturating_sub(1),
            bottom: if y >= last { last } else { y + 1 },
        }
    }

    pub const fn width(&self) -> Coord {
        self.right - self.left + 1
    }

    pub const fn height(&self) -> Coord {
        self.bottom - self.top + 1
    }

    pub const fn area(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub const fn contains(&self, (x, y): Coord2) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Grows this region so it also covers `other`.
    pub fn include(&mut self, other: Region) {
        self.left = self.left.min(other.left);
        self.right = self.right.max(other.right);
        self.top = self.top.min(other.top);
        self.bottom = self.bottom.max(other.bottom);
    }

    /// Iterates column by column, `x` outer and `y` inner.
    pub fn iter(&self) -> RegionIter {
        RegionIter {
            region: *self,
            next: Some((self.left, self.top)),
        }
    }
}

impl IntoIterator for Region {
    type Item = Coord2;
    type IntoIter = RegionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
pub struct RegionIter {
    region: Region,
    next: Option<Coord2>,
}

impl Iterator for RegionIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let (x, y) = current;

        self.next = if y < self.region.bottom {
            Some((x, y + 1))
        } else if x < self.region.right {
            Some((x + 1, self.region.top))
        } else {
            None
        };

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighborhood_is_clamped_at_corners() {
        assert_eq!(
            Region::neighborhood((0, 0), 5),
            Region {
                left: 0,
                right: 1,
                top: 0,
                bottom: 1
            }
        );
        assert_eq!(
            Region::neighborhood((4, 2), 5),
            Region {
                left: 3,
                right: 4,
                top: 1,
                bottom: 3
            }
        );
    }

    #[test]
    fn single_cell_board_neighborhood_is_the_cell() {
        let region = Region::neighborhood((0, 0), 1);

        assert_eq!(region, Region::cell((0, 0)));
        assert_eq!(region.area(), 1);
    }

    #[test]
    fn iter_walks_columns_first() {
        let cells: Vec<_> = Region::neighborhood((0, 0), 3).iter().collect();

        assert_eq!(cells, [(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn include_grows_monotonically() {
        let mut region = Region::cell((2, 2));
        region.include(Region::cell((0, 3)));
        region.include(Region::cell((1, 1)));

        assert_eq!(
            region,
            Region {
                left: 0,
                right: 2,
                top: 1,
                bottom: 3
            }
        );
        assert!(region.contains((1, 2)));
        assert!(!region.contains((3, 2)));
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(0.21 * 400.0), 84);
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(0.49), 0);
        assert_eq!(round_half_up(-3.0), 0);
    }
}
