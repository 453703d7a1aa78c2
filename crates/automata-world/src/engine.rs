//! Host-facing handle over a [`World`].
//!
//! Renderers and input handlers talk to the engine through this type. It may
//! exist before a world has been configured, in which case every call reports
//! [`Error::NotInitialized`].

use crate::world::{Snapshot, World};
use automata_core::{CellState, Dimensions, Error, Result, WorldConfig};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct Engine {
    world: Option<World>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the world; replaces any world built earlier
    pub fn initialize(&mut self, config: WorldConfig) -> Result<()> {
        let world = World::new(config)?;
        if self.world.replace(world).is_some() {
            info!("Replaced existing world");
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    pub fn world(&self) -> Result<&World> {
        self.world.as_ref().ok_or(Error::NotInitialized)
    }

    pub fn world_mut(&mut self) -> Result<&mut World> {
        self.world.as_mut().ok_or(Error::NotInitialized)
    }

    pub fn config(&self) -> Result<&WorldConfig> {
        Ok(self.world()?.config())
    }

    pub fn dimensions(&self) -> Result<Dimensions> {
        Ok(self.world()?.dimensions())
    }

    pub fn generation(&self) -> Result<u64> {
        Ok(self.world()?.generation())
    }

    pub fn tick(&mut self) -> Result<()> {
        self.world_mut()?.tick()
    }

    /// Toggle the cell under display coordinates `(px, py)`.
    ///
    /// Returns `Ok(false)` when the point falls outside the grid.
    pub fn click(&mut self, px: f64, py: f64) -> Result<bool> {
        let world = self.world_mut()?;
        let scale = world.config().pixel_scale;

        match (cell_coordinate(px, scale), cell_coordinate(py, scale)) {
            (Some(x), Some(y)) => Ok(world.toggle_cell(x, y)),
            _ => {
                debug!(px, py, "Ignoring click outside the grid");
                Ok(false)
            }
        }
    }

    pub fn toggle_cell(&mut self, x: i32, y: i32) -> Result<bool> {
        Ok(self.world_mut()?.toggle_cell(x, y))
    }

    pub fn reload(&mut self) -> Result<()> {
        self.world_mut()?.reload();
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        self.world_mut()?.blank();
        Ok(())
    }

    pub fn state(&self) -> Result<Vec<CellState>> {
        Ok(self.world()?.state())
    }

    pub fn labels(&self) -> Result<Vec<&'static str>> {
        Ok(self.world()?.labels())
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.world()?.snapshot())
    }
}

/// Map a display coordinate to a cell coordinate, `floor(p / scale)`
fn cell_coordinate(p: f64, scale: i32) -> Option<i32> {
    if !p.is_finite() {
        return None;
    }
    let cell = (p / f64::from(scale)).floor();
    if cell < f64::from(i32::MIN) || cell > f64::from(i32::MAX) {
        return None;
    }
    Some(cell as i32)
}
