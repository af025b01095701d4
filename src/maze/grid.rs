//! Grid provider seam and the concrete wall-flag grid
//!
//! The engine never builds maze geometry itself; it consults a
//! [`GridProvider`] for wall openness, bounds, and the exit marker.
//! [`GridMap`] is the bundled implementation used by the generator and by
//! ASCII test fixtures.

use bevy::prelude::*;

use crate::actor::Facing;

/// Read-only view of the maze consumed by movement and the executor
pub trait GridProvider: Send + Sync {
    /// Whether the given side of `cell` is walled. Out-of-bounds cells are
    /// treated as fully walled.
    fn has_wall(&self, cell: IVec2, side: Facing) -> bool;

    /// Whether the terminal exit marker sits on `cell`
    fn exit_at(&self, cell: IVec2) -> bool;

    fn in_bounds(&self, cell: IVec2) -> bool;
}

/// Resource wrapping the active grid provider
#[derive(Resource)]
pub struct Maze(pub Box<dyn GridProvider>);

impl Maze {
    pub fn grid(&self) -> &dyn GridProvider {
        self.0.as_ref()
    }
}

const WALL_N: u8 = 1;
const WALL_S: u8 = 2;
const WALL_E: u8 = 4;
const WALL_W: u8 = 8;

fn wall_bit(side: Facing) -> u8 {
    match side {
        Facing::North => WALL_N,
        Facing::South => WALL_S,
        Facing::East => WALL_E,
        Facing::West => WALL_W,
    }
}

/// Rectangular grid of cells with per-side wall flags
#[derive(Debug, Clone)]
pub struct GridMap {
    width: i32,
    height: i32,
    walls: Vec<u8>,
    exit: Option<IVec2>,
}

impl GridMap {
    /// A fully walled grid (every cell sealed on all four sides)
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            walls: vec![WALL_N | WALL_S | WALL_E | WALL_W; (width * height) as usize],
            exit: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn exit(&self) -> Option<IVec2> {
        self.exit
    }

    pub fn set_exit(&mut self, cell: IVec2) {
        self.exit = Some(cell);
    }

    fn idx(&self, cell: IVec2) -> usize {
        (cell.y * self.width + cell.x) as usize
    }

    /// Open one side of `cell`, and the matching side of the neighbor when
    /// it exists (walls are stored symmetrically on both cells).
    pub fn open(&mut self, cell: IVec2, side: Facing) {
        if !self.in_bounds(cell) {
            return;
        }
        let idx = self.idx(cell);
        self.walls[idx] &= !wall_bit(side);

        let neighbor = cell + side.delta();
        if self.in_bounds(neighbor) {
            let idx = self.idx(neighbor);
            self.walls[idx] &= !wall_bit(side.opposite());
        }
    }

    /// Parse a fixture maze drawn as ASCII art.
    ///
    /// The drawing is `2*height + 1` rows of `2*width + 1` characters; the
    /// top row is the north edge. Odd row/column intersections are cells,
    /// the characters between them are wall slots: `#` is a wall, anything
    /// else is open. Inside a cell, `E` marks the exit, `A`/`B` mark spawn
    /// cells. Short or missing rows read as walls (lenient, like every
    /// other parser in this crate).
    pub fn from_ascii(text: &str) -> (Self, AsciiMarkers) {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches(['\r']))
            .filter(|l| !l.trim().is_empty())
            .collect();

        let height = ((rows.len() as i32 - 1) / 2).max(1);
        let width = rows
            .iter()
            .map(|r| (r.chars().count() as i32 - 1) / 2)
            .max()
            .unwrap_or(1)
            .max(1);

        let mut grid = Self::new(width, height);
        let mut markers = AsciiMarkers::default();

        let char_at = |r: i32, c: i32| -> char {
            rows.get(r as usize)
                .and_then(|row| row.chars().nth(c as usize))
                .unwrap_or('#')
        };

        for y in 0..height {
            for x in 0..width {
                let cell = IVec2::new(x, y);
                // Row 0 of the drawing is the north edge of the top cell row.
                let r = 2 * (height - 1 - y) + 1;
                let c = 2 * x + 1;

                match char_at(r, c) {
                    'E' => {
                        grid.set_exit(cell);
                        markers.exit = Some(cell);
                    }
                    'A' => markers.spawn_a = Some(cell),
                    'B' => markers.spawn_b = Some(cell),
                    _ => {}
                }

                if char_at(r - 1, c) != '#' {
                    grid.open(cell, Facing::North);
                }
                if char_at(r + 1, c) != '#' {
                    grid.open(cell, Facing::South);
                }
                if char_at(r, c + 1) != '#' {
                    grid.open(cell, Facing::East);
                }
                if char_at(r, c - 1) != '#' {
                    grid.open(cell, Facing::West);
                }
            }
        }

        (grid, markers)
    }
}

impl GridProvider for GridMap {
    fn has_wall(&self, cell: IVec2, side: Facing) -> bool {
        if !self.in_bounds(cell) {
            return true;
        }
        self.walls[self.idx(cell)] & wall_bit(side) != 0
    }

    fn exit_at(&self, cell: IVec2) -> bool {
        self.exit == Some(cell)
    }

    fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }
}

/// Optional cell markers picked up while parsing an ASCII fixture
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiMarkers {
    pub spawn_a: Option<IVec2>,
    pub spawn_b: Option<IVec2>,
    pub exit: Option<IVec2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_fully_walled() {
        let grid = GridMap::new(3, 3);
        let cell = IVec2::new(1, 1);
        assert!(grid.has_wall(cell, Facing::North));
        assert!(grid.has_wall(cell, Facing::South));
        assert!(grid.has_wall(cell, Facing::East));
        assert!(grid.has_wall(cell, Facing::West));
    }

    #[test]
    fn open_clears_both_sides() {
        let mut grid = GridMap::new(3, 3);
        let cell = IVec2::new(0, 0);
        grid.open(cell, Facing::East);

        assert!(!grid.has_wall(cell, Facing::East));
        assert!(!grid.has_wall(IVec2::new(1, 0), Facing::West));
        // Unrelated sides untouched
        assert!(grid.has_wall(cell, Facing::North));
    }

    #[test]
    fn out_of_bounds_reads_as_walled() {
        let grid = GridMap::new(2, 2);
        assert!(grid.has_wall(IVec2::new(-1, 0), Facing::East));
        assert!(!grid.in_bounds(IVec2::new(2, 0)));
    }

    #[test]
    fn ascii_corridor_parses() {
        // 3x1 corridor open west-to-east, exit on the right cell
        let (grid, markers) = GridMap::from_ascii(
            "#######\n\
             #A . E#\n\
             #######",
        );

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 1);
        assert_eq!(markers.spawn_a, Some(IVec2::new(0, 0)));
        assert_eq!(markers.exit, Some(IVec2::new(2, 0)));

        assert!(!grid.has_wall(IVec2::new(0, 0), Facing::East));
        assert!(!grid.has_wall(IVec2::new(1, 0), Facing::East));
        assert!(grid.has_wall(IVec2::new(0, 0), Facing::West));
        assert!(grid.has_wall(IVec2::new(0, 0), Facing::North));
        assert!(grid.exit_at(IVec2::new(2, 0)));
    }

    #[test]
    fn ascii_rows_map_top_row_to_north() {
        // 1x2 column: A below, open passage north to B
        let (grid, markers) = GridMap::from_ascii(
            "###\n\
             #B#\n\
             # #\n\
             #A#\n\
             ###",
        );

        assert_eq!(markers.spawn_a, Some(IVec2::new(0, 0)));
        assert_eq!(markers.spawn_b, Some(IVec2::new(0, 1)));
        assert!(!grid.has_wall(IVec2::new(0, 0), Facing::North));
        assert!(!grid.has_wall(IVec2::new(0, 1), Facing::South));
        assert!(grid.has_wall(IVec2::new(0, 1), Facing::North));
    }
}
