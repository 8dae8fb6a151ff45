//! Renderable snapshot of the board
//!
//! The presentation layer draws from this; the simulation never draws.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid;
use super::state::{BonusKind, GameState};
use crate::consts::GRID_SIZE;

/// What a single cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    SnakeHead,
    SnakeBody,
    Number {
        value: u8,
        /// Matches the value that must be eaten next
        is_target: bool,
        time_left: Option<u8>,
        poisonous: bool,
    },
    Bonus(BonusKind),
    Obstacle,
}

/// Row-major grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// Layer entities onto an empty grid: snake, numbers, bonus, obstacles
    pub fn from_state(state: &GameState) -> Self {
        let size = GRID_SIZE as usize;
        let mut board = Self {
            cells: vec![Cell::Empty; size * size],
        };

        for (i, seg) in state.snake.segments().enumerate() {
            let cell = if i == 0 { Cell::SnakeHead } else { Cell::SnakeBody };
            board.set(*seg, cell);
        }
        for n in &state.numbers {
            board.set(
                n.pos,
                Cell::Number {
                    value: n.value,
                    is_target: n.value == state.progress.target,
                    time_left: n.time_left,
                    poisonous: n.poisonous,
                },
            );
        }
        if let Some(bonus) = state.bonus {
            board.set(bonus.pos, Cell::Bonus(bonus.kind));
        }
        for o in &state.obstacles {
            board.set(o.pos, Cell::Obstacle);
        }

        board
    }

    fn index(pos: IVec2) -> usize {
        (pos.y * GRID_SIZE + pos.x) as usize
    }

    fn set(&mut self, pos: IVec2, cell: Cell) {
        if grid::in_bounds(pos) {
            self.cells[Self::index(pos)] = cell;
        }
    }

    pub fn get(&self, pos: IVec2) -> Cell {
        if grid::in_bounds(pos) {
            self.cells[Self::index(pos)]
        } else {
            Cell::Empty
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(GRID_SIZE as usize)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::SnakeHead => '@',
                    Cell::SnakeBody => 'o',
                    Cell::Number { poisonous: true, .. } => 'x',
                    Cell::Number { value, .. } => char::from(b'0' + value),
                    Cell::Bonus(BonusKind::ScoreMultiplier) => '*',
                    Cell::Bonus(BonusKind::TimeFreeze) => '~',
                    Cell::Bonus(BonusKind::Shrink) => '%',
                    Cell::Obstacle => '#',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BonusItem, NumberItem, Obstacle};
    use crate::tuning::Difficulty;

    #[test]
    fn test_layers() {
        let mut state = GameState::new(1, Difficulty::default());
        state.numbers = vec![
            NumberItem::plain(IVec2::new(2, 3), 1),
            NumberItem::plain(IVec2::new(4, 4), 7),
        ];
        state.bonus = Some(BonusItem {
            pos: IVec2::new(5, 5),
            kind: BonusKind::TimeFreeze,
        });
        state.obstacles.push(Obstacle {
            pos: IVec2::new(4, 4),
            direction: None,
        });

        let board = Board::from_state(&state);
        assert_eq!(board.get(IVec2::new(8, 8)), Cell::SnakeHead);
        assert_eq!(
            board.get(IVec2::new(2, 3)),
            Cell::Number {
                value: 1,
                is_target: true,
                time_left: None,
                poisonous: false
            }
        );
        // Obstacles draw over anything beneath them
        assert_eq!(board.get(IVec2::new(4, 4)), Cell::Obstacle);
        assert_eq!(board.get(IVec2::new(5, 5)), Cell::Bonus(BonusKind::TimeFreeze));
        assert_eq!(board.get(IVec2::new(0, 0)), Cell::Empty);
    }

    #[test]
    fn test_ascii() {
        let mut state = GameState::new(1, Difficulty::default());
        state.numbers = vec![NumberItem::plain(IVec2::new(0, 0), 3)];
        let text = Board::from_state(&state).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert!(lines[0].starts_with('3'));
        assert_eq!(lines[8].chars().nth(8), Some('@'));
    }
}
