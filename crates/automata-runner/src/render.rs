//! Text and JSON frames for stdout.

use anyhow::Result;
use automata_core::CellState;
use automata_world::World;
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One character per cell, one line per row
    Text,
    /// One JSON snapshot per line
    Json,
}

pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Alive => '#',
        CellState::Dying => '*',
        CellState::Dead | CellState::Off => '.',
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: Format,
}

impl Renderer {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn render(&self, world: &World) -> Result<String> {
        match self.format {
            Format::Text => Ok(text_frame(world)),
            Format::Json => Ok(serde_json::to_string(&world.snapshot())?),
        }
    }

    pub fn draw(&self, world: &World, out: &mut impl Write) -> Result<()> {
        let frame = self.render(world)?;
        writeln!(out, "{frame}")?;
        out.flush()?;
        Ok(())
    }
}

fn text_frame(world: &World) -> String {
    let width = world.dimensions().width as usize;
    let census = world.census();

    let mut frame = format!(
        "{} | generation {} | alive {} dying {}\n",
        world.family(),
        world.generation(),
        census.alive,
        census.dying
    );
    for row in world.cells().chunks(width) {
        frame.extend(row.iter().map(|state| glyph(*state)));
        frame.push('\n');
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use automata_core::{InitialState, RuleFamily, WorldConfig};

    fn world() -> World {
        let config = WorldConfig {
            initial: InitialState::Blank,
            ..WorldConfig::new(4, 2, 1, RuleFamily::ThreeState)
        };
        let mut world = World::new(config).unwrap();
        world.toggle_cell(1, 0);
        world.toggle_cell(3, 1);
        world
    }

    #[test]
    fn test_text_frame() {
        let frame = Renderer::new(Format::Text).render(&world()).unwrap();
        let lines: Vec<_> = frame.lines().collect();
        assert_eq!(lines[0], "Brian's Brain | generation 0 | alive 2 dying 0");
        assert_eq!(lines[1], ".#..");
        assert_eq!(lines[2], "...#");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_json_frame() {
        let frame = Renderer::new(Format::Json).render(&world()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["generation"], 0);
        assert_eq!(value["family"], "three-state");
        assert_eq!(value["cells"][1], "alive");
        assert_eq!(value["cells"][0], "off");
    }

    #[test]
    fn test_draw_writes_line() {
        let mut out = Vec::new();
        Renderer::new(Format::Json).draw(&world(), &mut out).unwrap();
        assert!(out.ends_with(b"\n"));
        assert_eq!(out.iter().filter(|b| **b == b'\n').count(), 1);
    }
}
