//! Cursor snapping for the placement preview.
//!
//! Both snaps return the pixel position of the footprint's top-left corner.

use gridpaint_core::geometry::{CELL_SIZE, Footprint, PixelPosition, Vector};
use tracing::trace;

/// Edge length of the rail grid in pixels (two cells).
pub const RAIL_GRID: i32 = 2 * CELL_SIZE;

const CELL: f64 = CELL_SIZE as f64;
const HALF_CELL: f64 = CELL / 2.0;

fn snap_axis(cursor: f64, extent: u32) -> i32 {
    // Float-to-int casts saturate, so a far-off cursor pins to the edge.
    ((cursor / CELL + (1.0 - extent as f64) / 2.0).floor() * CELL) as i32
}

/// Snap a footprint so that its centre lands as close to the cursor as the
/// grid allows: odd extents centre on the cursor's cell, even extents on the
/// nearest grid line.
pub fn snap_to_cells(cursor: Vector, footprint: Footprint) -> PixelPosition {
    let snapped = PixelPosition::new(
        snap_axis(cursor.x, footprint.width),
        snap_axis(cursor.y, footprint.height),
    );
    trace!(?cursor, ?footprint, ?snapped, "snapped to cells");
    snapped
}

fn rail_axis(cursor: f64, offset_cells: i32, extent: u32) -> i32 {
    let rail = RAIL_GRID as f64;
    let centre = cursor - (cursor + offset_cells as f64 * CELL).rem_euclid(rail) + rail / 2.0;
    (centre - extent as f64 * HALF_CELL).round() as i32
}

/// Snap a footprint to the two-cell rail grid, shifted by `offset` cells.
pub fn snap_to_rail_grid(cursor: Vector, footprint: Footprint, offset: (i32, i32)) -> PixelPosition {
    let snapped = PixelPosition::new(
        rail_axis(cursor.x, offset.0, footprint.width),
        rail_axis(cursor.y, offset.1, footprint.height),
    );
    trace!(?cursor, ?offset, ?snapped, "snapped to rail grid");
    snapped
}

/// Pixel centre of a footprint placed at `position`.
pub fn footprint_center(position: PixelPosition, footprint: Footprint) -> Vector {
    Vector::new(
        position.x as f64 + footprint.width as f64 * HALF_CELL,
        position.y as f64 + footprint.height as f64 * HALF_CELL,
    )
}

/// Where to re-snap a non-square footprint after a rotation: the old centre
/// nudged half a cell toward the cursor on each axis.
pub fn rotation_anchor(old_center: Vector, cursor: Vector) -> Vector {
    let nudge = |centre: f64, cursor: f64| {
        if cursor >= centre {
            centre + HALF_CELL
        } else {
            centre - HALF_CELL
        }
    };
    Vector::new(nudge(old_center.x, cursor.x), nudge(old_center.y, cursor.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn single_cell_snaps_to_cursor_cell() {
        let fp = Footprint::single();
        assert_eq!(snap_to_cells(v(80.0, 110.0), fp), PixelPosition::new(64, 96));
        assert_eq!(snap_to_cells(v(64.0, 96.0), fp), PixelPosition::new(64, 96));
        assert_eq!(snap_to_cells(v(-1.0, -33.0), fp), PixelPosition::new(-32, -64));
    }

    #[test]
    fn odd_extent_centres_on_cell() {
        // 3x3 around the cell (2, 2).
        let fp = Footprint::new(3, 3);
        assert_eq!(snap_to_cells(v(80.0, 80.0), fp), PixelPosition::new(32, 32));
    }

    #[test]
    fn even_extent_centres_on_nearest_line() {
        let fp = Footprint::new(2, 2);
        // Nearest grid line to 70 is 64, so the 2x2 spans 32..96.
        assert_eq!(snap_to_cells(v(70.0, 70.0), fp), PixelPosition::new(32, 32));
        // Nearest grid line to 90 is 96, so it spans 64..128.
        assert_eq!(snap_to_cells(v(90.0, 90.0), fp), PixelPosition::new(64, 64));
    }

    #[test]
    fn non_square_mixes_rules() {
        // 3 wide centres on the cell, 2 high on the nearest line.
        let fp = Footprint::new(3, 2);
        assert_eq!(snap_to_cells(v(80.0, 70.0), fp), PixelPosition::new(32, 32));
    }

    #[test]
    fn far_cursor_saturates() {
        let snapped = snap_to_cells(v(3.0e9, -3.0e9), Footprint::new(3, 3));
        assert_eq!(snapped.x, i32::MAX);
        assert_eq!(snapped.y, i32::MIN);
        let rail = snap_to_rail_grid(v(3.0e9, 0.0), Footprint::new(2, 2), (i32::MAX, 0));
        assert_eq!(rail.x, i32::MAX);
    }

    #[test]
    fn rail_grid_snaps_to_two_cells() {
        let fp = Footprint::new(2, 2);
        // Centre lands on 64k + 32, origin one cell up-left.
        assert_eq!(snap_to_rail_grid(v(10.0, 100.0), fp, (0, 0)), PixelPosition::new(0, 64));
        assert_eq!(snap_to_rail_grid(v(63.0, 64.0), fp, (0, 0)), PixelPosition::new(0, 64));
        assert_eq!(snap_to_rail_grid(v(-10.0, 0.0), fp, (0, 0)), PixelPosition::new(-64, 0));
    }

    #[test]
    fn rail_grid_offset_shifts_by_a_cell() {
        let fp = Footprint::new(2, 2);
        assert_eq!(snap_to_rail_grid(v(10.0, 10.0), fp, (1, 1)), PixelPosition::new(-32, -32));
        assert_eq!(snap_to_rail_grid(v(40.0, 10.0), fp, (1, 0)), PixelPosition::new(32, 0));
    }

    #[test]
    fn centre_and_rotation_anchor() {
        let fp = Footprint::new(3, 2);
        let centre = footprint_center(PixelPosition::new(0, 0), fp);
        assert_eq!(centre, v(48.0, 32.0));

        assert_eq!(rotation_anchor(centre, v(60.0, 40.0)), v(64.0, 48.0));
        assert_eq!(rotation_anchor(centre, v(10.0, 10.0)), v(32.0, 16.0));
        // On the centre counts as past it.
        assert_eq!(rotation_anchor(centre, centre), v(64.0, 48.0));
    }
}
