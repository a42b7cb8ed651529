//! Grid geometry: cell and pixel positions, footprints, and the pure
//! direction helpers used for placement and connection points.

use crate::direction::Direction;
use serde::{Deserialize, Serialize};

/// Edge length of one grid cell in pixels.
pub const CELL_SIZE: i32 = 32;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A 2D vector in cell units, used for points and connection offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Vector {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A position on the 2D grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step `distance` cells in `direction`.
    pub fn step(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// Top-left pixel corner of this cell.
    pub fn to_pixels(self) -> PixelPosition {
        PixelPosition::new(
            self.x.saturating_mul(CELL_SIZE),
            self.y.saturating_mul(CELL_SIZE),
        )
    }
}

/// A position in pixel space. One cell is [`CELL_SIZE`] pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: i32,
    pub y: i32,
}

impl PixelPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell containing this pixel.
    pub fn to_grid(self) -> GridPosition {
        GridPosition::new(
            self.x.div_euclid(CELL_SIZE),
            self.y.div_euclid(CELL_SIZE),
        )
    }
}

/// The width x height extent of an entity, in cells, in its north-facing
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A 1x1 footprint.
    pub fn single() -> Self {
        Self::new(1, 1)
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Number of cells covered.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// The footprint as it lies on the grid when facing `direction`.
    pub fn for_direction(&self, direction: Direction) -> Self {
        let size = resize_for_direction(*self, direction);
        Self::new(size.x, size.y)
    }

    /// Iterate over all cells occupied by this footprint at the given origin.
    /// Origin is the top-left corner.
    pub fn tiles(&self, origin: GridPosition) -> impl Iterator<Item = GridPosition> {
        let w = self.width as i32;
        let h = self.height as i32;
        let ox = origin.x;
        let oy = origin.y;
        (0..h).flat_map(move |dy| (0..w).map(move |dx| GridPosition::new(ox + dx, oy + dy)))
    }

    /// Centre of the footprint at `origin`, in half cells. Integer so that
    /// centres of differently shaped footprints compare exactly.
    pub fn doubled_center(&self, origin: GridPosition) -> (i32, i32) {
        (
            origin.x * 2 + self.width as i32,
            origin.y * 2 + self.height as i32,
        )
    }
}

/// A width/height pair already transformed for a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub x: u32,
    pub y: u32,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rotate a point about the origin by a cardinal direction.
///
/// North is the identity, east maps `(x, y)` to `(-y, x)`, south negates
/// both axes and west maps `(x, y)` to `(y, -x)`.
pub fn rotate_point(point: impl Into<Vector>, direction: Direction) -> Vector {
    let p = point.into();
    match direction {
        Direction::North => Vector::new(p.x, p.y),
        Direction::East => Vector::new(-p.y, p.x),
        Direction::South => Vector::new(-p.x, -p.y),
        Direction::West => Vector::new(p.y, -p.x),
    }
}

/// Transform a connection point offset for an entity facing `direction`.
///
/// The offset's dominant axis picks the side it sits on. The dominant
/// coordinate is pulled one cell back toward the entity before rotating.
pub fn transform_connection_offset(position: impl Into<Vector>, direction: Direction) -> Vector {
    let mut p = position.into();
    let side = if p.x.abs() > p.y.abs() {
        if p.x > 0.0 {
            Direction::East
        } else {
            Direction::West
        }
    } else if p.y > 0.0 {
        Direction::South
    } else {
        Direction::North
    };
    match side {
        Direction::North => p.y += 1.0,
        Direction::East => p.x -= 1.0,
        Direction::South => p.y -= 1.0,
        Direction::West => p.x += 1.0,
    }
    rotate_point(p, direction)
}

/// Width and height of `footprint` when facing `direction`. Non-square
/// footprints swap their extents when facing east or west.
pub fn resize_for_direction(footprint: Footprint, direction: Direction) -> Size {
    if !footprint.is_square() && direction.is_horizontal() {
        Size {
            x: footprint.height,
            y: footprint.width,
        }
    } else {
        Size {
            x: footprint.width,
            y: footprint.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_point_quarter_turns() {
        let p = Vector::new(1.0, 2.0);
        assert_eq!(rotate_point(p, Direction::North), Vector::new(1.0, 2.0));
        assert_eq!(rotate_point(p, Direction::East), Vector::new(-2.0, 1.0));
        assert_eq!(rotate_point(p, Direction::South), Vector::new(-1.0, -2.0));
        assert_eq!(rotate_point(p, Direction::West), Vector::new(2.0, -1.0));
    }

    #[test]
    fn rotate_point_accepts_pairs_and_arrays() {
        assert_eq!(
            rotate_point((0.5, -1.0), Direction::East),
            rotate_point([0.5, -1.0], Direction::East)
        );
    }

    #[test]
    fn connection_offset_snaps_toward_entity() {
        // A point one cell above the entity sits on its north edge.
        assert_eq!(
            transform_connection_offset((0.0, -1.0), Direction::North),
            Vector::new(0.0, 0.0)
        );
        assert_eq!(
            transform_connection_offset((0.0, 1.5), Direction::North),
            Vector::new(0.0, 0.5)
        );
        // Horizontal side wins when |x| > |y|.
        assert_eq!(
            transform_connection_offset((2.0, 0.5), Direction::North),
            Vector::new(1.0, 0.5)
        );
        assert_eq!(
            transform_connection_offset((-2.0, 0.5), Direction::South),
            Vector::new(1.0, -0.5)
        );
    }

    #[test]
    fn connection_offset_rotates_after_snapping() {
        let snapped = transform_connection_offset((0.0, 2.0), Direction::North);
        let rotated = transform_connection_offset((0.0, 2.0), Direction::East);
        assert_eq!(rotate_point(snapped, Direction::East), rotated);
    }

    #[test]
    fn zero_connection_offset_counts_as_north() {
        assert_eq!(
            transform_connection_offset((0.0, 0.0), Direction::North),
            Vector::new(0.0, 1.0)
        );
    }

    #[test]
    fn resize_swaps_non_square_sideways() {
        let fp = Footprint::new(1, 2);
        assert_eq!(resize_for_direction(fp, Direction::North), Size { x: 1, y: 2 });
        assert_eq!(resize_for_direction(fp, Direction::East), Size { x: 2, y: 1 });
        assert_eq!(resize_for_direction(fp, Direction::South), Size { x: 1, y: 2 });
        assert_eq!(resize_for_direction(fp, Direction::West), Size { x: 2, y: 1 });
    }

    #[test]
    fn resize_keeps_square() {
        let fp = Footprint::new(3, 3);
        for dir in Direction::all() {
            assert_eq!(resize_for_direction(fp, dir), Size { x: 3, y: 3 });
        }
    }

    #[test]
    fn footprint_tiles_iteration() {
        let fp = Footprint::new(2, 3);
        let tiles: Vec<_> = fp.tiles(GridPosition::new(10, 20)).collect();
        assert_eq!(tiles.len(), 6);
        assert!(tiles.contains(&GridPosition::new(10, 20)));
        assert!(tiles.contains(&GridPosition::new(11, 22)));
        assert!(!tiles.contains(&GridPosition::new(12, 20)));
    }

    #[test]
    fn doubled_center_matches_across_rotations() {
        // 1x3 at (1, 0) and 3x1 at (0, 1) share the centre cell (1, 1).
        let north = Footprint::new(1, 3);
        let east = north.for_direction(Direction::East);
        assert_eq!(
            north.doubled_center(GridPosition::new(1, 0)),
            east.doubled_center(GridPosition::new(0, 1))
        );
    }

    #[test]
    fn pixel_grid_conversion() {
        assert_eq!(PixelPosition::new(64, 96).to_grid(), GridPosition::new(2, 3));
        assert_eq!(PixelPosition::new(-1, 31).to_grid(), GridPosition::new(-1, 0));
        assert_eq!(GridPosition::new(2, 3).to_pixels(), PixelPosition::new(64, 96));
    }

    #[test]
    fn far_cells_saturate_in_pixels() {
        let far = GridPosition::new(i32::MAX / 8, i32::MIN / 8).to_pixels();
        assert_eq!(far, PixelPosition::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn grid_step() {
        let p = GridPosition::new(0, 0);
        assert_eq!(p.step(Direction::North, 3), GridPosition::new(0, -3));
        assert_eq!(p.step(Direction::West, 2), GridPosition::new(-2, 0));
    }
}
