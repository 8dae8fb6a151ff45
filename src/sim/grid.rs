//! Grid coordinates and spatial queries
//!
//! The board is a fixed `GRID_SIZE` x `GRID_SIZE` square. Positions are
//! integer vectors so they hash cleanly into occupancy sets.

use std::collections::HashSet;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{GRID_SIZE, SPAWN_ATTEMPTS};

/// A cell on the board (x grows right, y grows down)
pub type Position = IVec2;

/// Set of cells currently claimed by some entity
pub type Occupancy = HashSet<Position>;

/// Heading of the snake or a moving obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step for this heading
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// Uniformly random heading
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Whether a position lies on the board
#[inline]
pub fn in_bounds(pos: Position) -> bool {
    pos.x >= 0 && pos.x < GRID_SIZE && pos.y >= 0 && pos.y < GRID_SIZE
}

#[inline]
pub fn is_occupied(pos: Position, occupied: &Occupancy) -> bool {
    occupied.contains(&pos)
}

/// Pick a free cell.
///
/// Tries `SPAWN_ATTEMPTS` uniform draws first, then scans row-major for the
/// first free cell. Returns `None` only when the board is completely full.
pub fn random_empty_position<R: Rng + ?Sized>(
    rng: &mut R,
    occupied: &Occupancy,
) -> Option<Position> {
    for _ in 0..SPAWN_ATTEMPTS {
        let pos = IVec2::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE));
        if !is_occupied(pos, occupied) {
            return Some(pos);
        }
    }

    let fallback = (0..GRID_SIZE)
        .flat_map(|y| (0..GRID_SIZE).map(move |x| IVec2::new(x, y)))
        .find(|pos| !is_occupied(*pos, occupied));

    if fallback.is_none() {
        log::warn!("No free cell left on the board");
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn full_board_except(free: &[Position]) -> Occupancy {
        let mut occupied = Occupancy::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let pos = IVec2::new(x, y);
                if !free.contains(&pos) {
                    occupied.insert(pos);
                }
            }
        }
        occupied
    }

    #[test]
    fn test_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_bounds() {
        assert!(in_bounds(IVec2::new(0, 0)));
        assert!(in_bounds(IVec2::new(GRID_SIZE - 1, GRID_SIZE - 1)));
        assert!(!in_bounds(IVec2::new(-1, 3)));
        assert!(!in_bounds(IVec2::new(3, GRID_SIZE)));
    }

    #[test]
    fn test_random_empty_avoids_occupied() {
        let mut rng = Pcg32::seed_from_u64(7);
        let occupied: Occupancy = (0..GRID_SIZE).map(|x| IVec2::new(x, 0)).collect();
        for _ in 0..200 {
            let pos = random_empty_position(&mut rng, &occupied).unwrap();
            assert!(in_bounds(pos));
            assert!(!occupied.contains(&pos));
        }
    }

    #[test]
    fn test_fallback_scan_finds_last_cell() {
        let mut rng = Pcg32::seed_from_u64(1);
        let only = IVec2::new(GRID_SIZE - 1, GRID_SIZE - 1);
        let occupied = full_board_except(&[only]);
        assert_eq!(random_empty_position(&mut rng, &occupied), Some(only));
    }

    #[test]
    fn test_full_board_returns_none() {
        let mut rng = Pcg32::seed_from_u64(1);
        let occupied = full_board_except(&[]);
        assert_eq!(random_empty_position(&mut rng, &occupied), None);
    }
}
