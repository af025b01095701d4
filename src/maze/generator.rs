//! Seedable maze generation: recursive backtracker plus match furniture
//! (spawn corners, a carved exit, scattered powerups)

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::actor::Facing;
use crate::constants::{MIN_MAZE_SIZE, POWERUPS_PER_KIND};
use crate::powerup::PowerupKind;

use super::grid::{GridMap, GridProvider};

/// A generated (or fixture) maze with everything a match needs to start
#[derive(Debug, Clone)]
pub struct MazeLayout {
    pub grid: GridMap,
    pub spawn_a: IVec2,
    pub spawn_b: IVec2,
    pub exit: IVec2,
    pub powerups: Vec<(IVec2, PowerupKind)>,
}

impl MazeLayout {
    /// Build a layout from an ASCII fixture. Missing markers fall back to
    /// the corners / the last cell, so terse fixtures stay valid.
    pub fn from_ascii(text: &str) -> Self {
        let (mut grid, markers) = GridMap::from_ascii(text);
        let far_corner = IVec2::new(grid.width() - 1, grid.height() - 1);
        let exit = markers.exit.or(grid.exit()).unwrap_or(far_corner);
        grid.set_exit(exit);
        Self {
            spawn_a: markers.spawn_a.unwrap_or(IVec2::ZERO),
            spawn_b: markers.spawn_b.unwrap_or(far_corner),
            exit,
            powerups: Vec::new(),
            grid,
        }
    }

    pub fn with_powerups(mut self, powerups: Vec<(IVec2, PowerupKind)>) -> Self {
        self.powerups = powerups;
        self
    }
}

/// Generate a perfect maze of the given size. A fixed `seed` reproduces the
/// same layout; `None` draws from entropy.
pub fn generate(width: i32, height: i32, seed: Option<u64>) -> MazeLayout {
    let width = if width < MIN_MAZE_SIZE {
        warn!("maze width {} below minimum, clamping to {}", width, MIN_MAZE_SIZE);
        MIN_MAZE_SIZE
    } else {
        width
    };
    let height = if height < MIN_MAZE_SIZE {
        warn!("maze height {} below minimum, clamping to {}", height, MIN_MAZE_SIZE);
        MIN_MAZE_SIZE
    } else {
        height
    };

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut grid = GridMap::new(width, height);
    carve_passages(&mut grid, &mut rng);

    let (spawn_a, spawn_b, exit) = place_entrances_and_exit(&mut grid, &mut rng);
    grid.set_exit(exit);

    let powerups = scatter_powerups(&grid, &mut rng, &[spawn_a, spawn_b, exit]);

    info!(
        "generated {}x{} maze: spawns A={} B={}, exit={}, {} powerups",
        width,
        height,
        spawn_a,
        spawn_b,
        exit,
        powerups.len()
    );

    MazeLayout {
        grid,
        spawn_a,
        spawn_b,
        exit,
        powerups,
    }
}

/// Depth-first backtracker over the fully walled grid
fn carve_passages(grid: &mut GridMap, rng: &mut StdRng) {
    let (width, height) = (grid.width(), grid.height());
    let mut visited = vec![false; (width * height) as usize];
    let visited_idx = |cell: IVec2| (cell.y * width + cell.x) as usize;

    let mut stack = vec![IVec2::ZERO];
    visited[0] = true;

    while let Some(&cell) = stack.last() {
        let mut candidates: Vec<Facing> = Vec::with_capacity(4);
        for side in [Facing::North, Facing::South, Facing::East, Facing::West] {
            let next = cell + side.delta();
            if grid.in_bounds(next) && !visited[visited_idx(next)] {
                candidates.push(side);
            }
        }

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let side = candidates[rng.gen_range(0..candidates.len())];
        let next = cell + side.delta();
        grid.open(cell, side);
        visited[visited_idx(next)] = true;
        stack.push(next);
    }
}

/// Spawns sit in two corners of one edge; the exit is carved through the
/// opposite boundary at a random offset.
fn place_entrances_and_exit(grid: &mut GridMap, rng: &mut StdRng) -> (IVec2, IVec2, IVec2) {
    let (w, h) = (grid.width(), grid.height());

    if rng.gen_bool(0.5) {
        // Spawn column on the west or east edge, exit through the other
        if rng.gen_bool(0.5) {
            let exit = IVec2::new(w - 1, rng.gen_range(0..h));
            grid.open(exit, Facing::East);
            (IVec2::new(0, 0), IVec2::new(0, h - 1), exit)
        } else {
            let exit = IVec2::new(0, rng.gen_range(0..h));
            grid.open(exit, Facing::West);
            (IVec2::new(w - 1, 0), IVec2::new(w - 1, h - 1), exit)
        }
    } else {
        // Spawn row on the south or north edge
        if rng.gen_bool(0.5) {
            let exit = IVec2::new(rng.gen_range(0..w), h - 1);
            grid.open(exit, Facing::North);
            (IVec2::new(0, 0), IVec2::new(w - 1, 0), exit)
        } else {
            let exit = IVec2::new(rng.gen_range(0..w), 0);
            grid.open(exit, Facing::South);
            (IVec2::new(0, h - 1), IVec2::new(w - 1, h - 1), exit)
        }
    }
}

/// Drop a few powerups of each kind on free cells
fn scatter_powerups(
    grid: &GridMap,
    rng: &mut StdRng,
    reserved: &[IVec2],
) -> Vec<(IVec2, PowerupKind)> {
    let mut placed: Vec<(IVec2, PowerupKind)> = Vec::new();

    for kind in [PowerupKind::Phase, PowerupKind::TrueRadar] {
        let mut remaining = POWERUPS_PER_KIND;
        let mut attempts = 0;
        while remaining > 0 && attempts < 200 {
            attempts += 1;
            let cell = IVec2::new(rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()));
            if reserved.contains(&cell) || placed.iter().any(|(p, _)| *p == cell) {
                continue;
            }
            placed.push((cell, kind));
            remaining -= 1;
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn reachable_count(grid: &GridMap, from: IVec2) -> usize {
        let mut seen = vec![false; (grid.width() * grid.height()) as usize];
        let idx = |c: IVec2| (c.y * grid.width() + c.x) as usize;
        let mut queue = VecDeque::from([from]);
        seen[idx(from)] = true;
        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for side in [Facing::North, Facing::South, Facing::East, Facing::West] {
                let next = cell + side.delta();
                if grid.in_bounds(next) && !grid.has_wall(cell, side) && !seen[idx(next)] {
                    seen[idx(next)] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    #[test]
    fn every_cell_is_reachable() {
        let layout = generate(8, 6, Some(7));
        assert_eq!(
            reachable_count(&layout.grid, layout.spawn_a),
            (8 * 6) as usize
        );
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(6, 6, Some(42));
        let b = generate(6, 6, Some(42));
        assert_eq!(a.spawn_a, b.spawn_a);
        assert_eq!(a.spawn_b, b.spawn_b);
        assert_eq!(a.exit, b.exit);
        assert_eq!(a.powerups, b.powerups);
    }

    #[test]
    fn spawns_are_distinct_and_in_bounds() {
        let layout = generate(5, 9, Some(3));
        assert_ne!(layout.spawn_a, layout.spawn_b);
        assert!(layout.grid.in_bounds(layout.spawn_a));
        assert!(layout.grid.in_bounds(layout.spawn_b));
        assert!(layout.grid.in_bounds(layout.exit));
        assert!(layout.grid.exit_at(layout.exit));
    }

    #[test]
    fn powerups_avoid_spawns_and_exit() {
        let layout = generate(7, 7, Some(11));
        assert_eq!(layout.powerups.len(), POWERUPS_PER_KIND * 2);
        for (cell, _) in &layout.powerups {
            assert_ne!(*cell, layout.spawn_a);
            assert_ne!(*cell, layout.spawn_b);
            assert_ne!(*cell, layout.exit);
        }
    }

    #[test]
    fn tiny_request_is_clamped() {
        let layout = generate(0, 0, Some(1));
        assert_eq!(layout.grid.width(), MIN_MAZE_SIZE);
        assert_eq!(layout.grid.height(), MIN_MAZE_SIZE);
    }
}
