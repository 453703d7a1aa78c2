//! A running automaton: grid, generation counter and rule family.

use crate::grid::Grid;
use crate::rules;
use automata_core::{
    CellState, Dimensions, Error, InitialState, Position, Result, RuleFamily, WorldConfig,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace};

#[derive(Debug, Clone)]
pub struct World {
    grid: Grid,
    // Reused as the next-generation buffer on every tick
    scratch: Vec<CellState>,
    config: WorldConfig,
    rng: ChaCha8Rng,
    generation: u64,
    delta: Vec<(Position, CellState)>,
}

/// Read-only copy of a world's cells for rendering or export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: u64,
    pub family: RuleFamily,
    pub width: i32,
    pub height: i32,
    /// Row-major, `width * height` long
    pub cells: Vec<CellState>,
}

/// Number of cells in each kind of state
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub alive: usize,
    pub dying: usize,
    /// `Dead` or `Off`, depending on the family
    pub inactive: usize,
}

impl World {
    /// Build a world from a validated configuration, seeded or blank per `config.initial`
    #[instrument(
        skip(config),
        fields(width = config.width, height = config.height, family = %config.rule_family)
    )]
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let grid = Grid::new(config.width, config.height, config.rule_family.baseline());

        let mut world = Self {
            scratch: Vec::with_capacity(grid.cells().len()),
            grid,
            config,
            rng,
            generation: 0,
            delta: Vec::new(),
        };

        match world.config.initial {
            InitialState::Random => world.reload(),
            InitialState::Blank => world.blank(),
        }

        info!(
            event = "world_created",
            initial = ?world.config.initial,
            seed = ?world.config.seed,
            "Created {} world",
            world.family()
        );

        Ok(world)
    }

    /// Build a world from explicit row-major cell content
    pub fn with_cells(config: WorldConfig, cells: Vec<CellState>) -> Result<Self> {
        let family = config.rule_family;
        let mut world = Self::new(WorldConfig {
            initial: InitialState::Blank,
            ..config
        })?;

        if cells.len() != world.grid.cells().len() {
            return Err(Error::Config(format!(
                "expected {} cells for a {}x{} grid, got {}",
                world.grid.cells().len(),
                world.grid.width,
                world.grid.height,
                cells.len()
            )));
        }
        if let Some(foreign) = cells.iter().find(|state| !family.admits(**state)) {
            return Err(Error::Config(format!(
                "state '{foreign}' is not valid for {family}"
            )));
        }

        world.grid.replace_cells(cells)?;
        world.mark_all_changed();
        Ok(world)
    }

    /// Advance exactly one generation.
    ///
    /// The next generation is computed in full from the current one before it
    /// replaces it; on error the world is left untouched.
    pub fn tick(&mut self) -> Result<()> {
        let mut next = std::mem::take(&mut self.scratch);
        next.clear();

        if let Err(err) = self.compute_next(&mut next) {
            error!(generation = self.generation, "Tick aborted: {}", err);
            self.scratch = next;
            return Err(err);
        }

        let previous = self.grid.replace_cells(next)?;
        self.delta = previous
            .iter()
            .zip(self.grid.cells())
            .enumerate()
            .filter(|(_, (before, after))| before != after)
            .map(|(i, (_, after))| (self.grid.index_to_pos(i), *after))
            .collect();
        self.scratch = previous;
        self.generation += 1;

        debug!(
            generation = self.generation,
            changed = self.delta.len(),
            "Advanced generation"
        );
        Ok(())
    }

    fn compute_next(&self, next: &mut Vec<CellState>) -> Result<()> {
        let family = self.family();
        let active = family.ignition_states();

        for (pos, current) in self.grid.iter() {
            let count = self.grid.neighbor_alive_count(pos, active);
            let state = rules::next_state(family, current, count).map_err(|err| match err {
                Error::InvariantViolation(msg) => {
                    Error::InvariantViolation(format!("at ({}, {}): {}", pos.x, pos.y, msg))
                }
                other => other,
            })?;
            next.push(state);
        }
        Ok(())
    }

    /// Flip a cell between the family's baseline state and `Alive`.
    ///
    /// Coordinates outside the grid and `Dying` cells are left alone; returns
    /// whether a cell changed.
    pub fn toggle_cell(&mut self, x: i32, y: i32) -> bool {
        if !self.grid.contains(x, y) {
            trace!(x, y, "Ignoring toggle outside the grid");
            return false;
        }

        let pos = Position::new(x, y);
        let current = self.grid.get(pos);
        match self.family().toggled(current) {
            Some(next) => {
                self.grid.set(pos, next);
                self.delta = vec![(pos, next)];
                true
            }
            None => {
                trace!(x, y, state = %current, "Cell is not interactive");
                false
            }
        }
    }

    /// Reseed every cell from the world's own generator and restart at generation 0
    pub fn reload(&mut self) {
        Self::seed(&mut self.grid, &self.config, &mut self.rng);
        self.reset();
        info!(event = "world_reloaded", census = ?self.census(), "Reloaded world");
    }

    /// Reseed every cell from the given generator and restart at generation 0
    pub fn reload_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        Self::seed(&mut self.grid, &self.config, rng);
        self.reset();
        info!(event = "world_reloaded", census = ?self.census(), "Reloaded world");
    }

    fn seed<R: Rng + ?Sized>(grid: &mut Grid, config: &WorldConfig, rng: &mut R) {
        let baseline = config.rule_family.baseline();
        let p = config.alive_probability;
        grid.fill_with(|_| {
            if rng.gen_bool(p) {
                CellState::Alive
            } else {
                baseline
            }
        });
    }

    /// Set every cell to the baseline state and restart at generation 0
    pub fn blank(&mut self) {
        self.grid.fill(self.family().baseline());
        self.reset();
        info!(event = "world_blanked", "Blanked world");
    }

    fn reset(&mut self) {
        self.generation = 0;
        self.mark_all_changed();
    }

    fn mark_all_changed(&mut self) {
        self.delta = self.grid.iter().collect();
    }

    /// Row-major copy of the current generation
    pub fn state(&self) -> Vec<CellState> {
        self.grid.cells().to_vec()
    }

    pub fn cells(&self) -> &[CellState] {
        self.grid.cells()
    }

    /// Row-major label of every cell
    pub fn labels(&self) -> Vec<&'static str> {
        self.grid.cells().iter().map(CellState::label).collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.generation,
            family: self.family(),
            width: self.grid.width,
            height: self.grid.height,
            cells: self.state(),
        }
    }

    /// Cell at wrapped coordinates
    pub fn get(&self, x: i32, y: i32) -> CellState {
        self.grid.get(Position::new(x, y))
    }

    /// Cells changed by the most recent tick or toggle; every cell after reload/blank
    pub fn last_changes(&self) -> &[(Position, CellState)] {
        &self.delta
    }

    pub fn census(&self) -> Census {
        self.grid
            .cells()
            .iter()
            .fold(Census::default(), |mut census, state| {
                match state {
                    CellState::Alive => census.alive += 1,
                    CellState::Dying => census.dying += 1,
                    CellState::Dead | CellState::Off => census.inactive += 1,
                }
                census
            })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    pub fn family(&self) -> RuleFamily {
        self.config.rule_family
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
