//! Core type definitions for the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given world dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }
}

/// Width and height of a grid, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

impl Dimensions {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `(x, y)` lies inside the grid without wrapping
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }
}

impl From<Dimensions> for (i32, i32) {
    fn from(dimensions: Dimensions) -> Self {
        (dimensions.width, dimensions.height)
    }
}

/// One of the eight Moore neighborhood offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

/// State of a single cell.
///
/// The two rule families share `Alive`; `Dead` belongs to the two-state
/// family only, `Off` and `Dying` to the three-state family only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Dead,
    Off,
    Alive,
    Dying,
}

impl CellState {
    /// Stable lowercase label, used as the encoded per-cell representation
    pub fn label(&self) -> &'static str {
        match self {
            CellState::Dead => "dead",
            CellState::Off => "off",
            CellState::Alive => "alive",
            CellState::Dying => "dying",
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Transition logic family governing a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleFamily {
    /// Conway's Life: `Dead` / `Alive`
    TwoState,
    /// Brian's Brain: `Off` / `Alive` / `Dying`
    ThreeState,
}

impl RuleFamily {
    /// Every state a cell of this family may hold
    pub fn states(&self) -> &'static [CellState] {
        match self {
            RuleFamily::TwoState => &[CellState::Dead, CellState::Alive],
            RuleFamily::ThreeState => &[CellState::Off, CellState::Alive, CellState::Dying],
        }
    }

    pub fn admits(&self, state: CellState) -> bool {
        self.states().contains(&state)
    }

    /// Inactive state used by `blank` and as the "dead-like" seed
    pub fn baseline(&self) -> CellState {
        match self {
            RuleFamily::TwoState => CellState::Dead,
            RuleFamily::ThreeState => CellState::Off,
        }
    }

    /// States that count as alive when counting neighbors
    pub fn ignition_states(&self) -> &'static [CellState] {
        &[CellState::Alive]
    }

    /// Interactive flip between the baseline state and `Alive`.
    ///
    /// Returns `None` for states that are not interactive (`Dying`, or a state
    /// foreign to this family).
    pub fn toggled(&self, state: CellState) -> Option<CellState> {
        let baseline = self.baseline();
        match state {
            CellState::Alive => Some(baseline),
            s if s == baseline => Some(CellState::Alive),
            _ => None,
        }
    }
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleFamily::TwoState => f.write_str("Game of Life"),
            RuleFamily::ThreeState => f.write_str("Brian's Brain"),
        }
    }
}

impl FromStr for RuleFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "life" | "gol" | "gof" | "two-state" | "gameoflife" => Ok(RuleFamily::TwoState),
            "brain" | "bb" | "three-state" | "briansbrain" => Ok(RuleFamily::ThreeState),
            other => Err(Error::Config(format!("unknown rule family: {other}"))),
        }
    }
}
