//! Next-state functions for each rule family.

use automata_core::{CellState, Error, Result, RuleFamily};

/// Conway's Life: survive on 2 or 3, birth on 3.
pub fn next_two_state(current: CellState, neighbor_alive_count: usize) -> Result<CellState> {
    match current {
        CellState::Alive if matches!(neighbor_alive_count, 2 | 3) => Ok(CellState::Alive),
        CellState::Dead if neighbor_alive_count == 3 => Ok(CellState::Alive),
        CellState::Alive | CellState::Dead => Ok(CellState::Dead),
        other => Err(foreign_state(RuleFamily::TwoState, other)),
    }
}

/// Brian's Brain: `Alive` always decays to `Dying`, `Dying` always to `Off`;
/// `Off` fires when exactly two neighbors are `Alive`.
pub fn next_three_state(current: CellState, neighbor_alive_count: usize) -> Result<CellState> {
    match current {
        CellState::Alive => Ok(CellState::Dying),
        CellState::Dying => Ok(CellState::Off),
        CellState::Off if neighbor_alive_count == 2 => Ok(CellState::Alive),
        CellState::Off => Ok(CellState::Off),
        other => Err(foreign_state(RuleFamily::ThreeState, other)),
    }
}

pub fn next_state(
    family: RuleFamily,
    current: CellState,
    neighbor_alive_count: usize,
) -> Result<CellState> {
    match family {
        RuleFamily::TwoState => next_two_state(current, neighbor_alive_count),
        RuleFamily::ThreeState => next_three_state(current, neighbor_alive_count),
    }
}

fn foreign_state(family: RuleFamily, state: CellState) -> Error {
    Error::InvariantViolation(format!("cell in state '{state}' is not valid for {family}"))
}
