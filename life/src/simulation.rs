use std::mem;

use log::{debug, trace};
use rand::Rng;

use crate::config::{ConfigError, LifeConfig, Rgba};
use crate::grid::Grid;

/// Double-buffered Game of Life on a torus together with its display texels.
///
/// `current` is only read while a step runs and `next` is only written; the
/// two are swapped afterwards. `pixels` always mirrors `current`.
pub struct Simulation {
    config: LifeConfig,
    current: Grid,
    next: Grid,
    pixels: Vec<Rgba>,
    generation: u64,
}

impl Simulation {
    /// Randomly seeded simulation using the thread-local generator.
    pub fn new(config: LifeConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(config: LifeConfig, rng: &mut R) -> Result<Self, ConfigError> {
        let mut simulation = Self::empty(config)?;
        simulation.randomize_with(rng);
        Ok(simulation)
    }

    /// Simulation starting from a known generation. The grid must have the
    /// configured dimensions.
    pub fn from_grid(config: LifeConfig, grid: Grid) -> Result<Self, ConfigError> {
        let mut simulation = Self::empty(config)?;
        if (grid.width(), grid.height()) != (config.width, config.height) {
            return Err(ConfigError::GridMismatch {
                expected: (config.width, config.height),
                got: (grid.width(), grid.height()),
            });
        }
        simulation.current = grid;
        simulation.refresh_pixels();
        Ok(simulation)
    }

    fn empty(config: LifeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            current: Grid::new(config.width, config.height),
            next: Grid::new(config.width, config.height),
            pixels: vec![config.dead_color; config.cell_count()],
            generation: 0,
        })
    }

    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::rng());
    }

    /// Reseed the current generation and restart the generation counter.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current.randomize(rng, self.config.alive_threshold);
        self.generation = 0;
        self.refresh_pixels();
        debug!(
            "seeded {}x{} grid with {} live cells",
            self.config.width,
            self.config.height,
            self.current.population()
        );
    }

    /// Advance one generation and return the new population.
    pub fn step(&mut self) -> usize {
        let width = self.current.width();
        let height = self.current.height();
        let cells = self.current.cells();
        let next = self.next.cells_mut();
        let mut population = 0;

        for y in 0..height {
            let row = y * width;
            let up = ((y + height - 1) % height) * width;
            let down = ((y + 1) % height) * width;

            for x in 0..width {
                let left = (x + width - 1) % width;
                let right = (x + 1) % width;

                let neighbors = cells[up + left] as u8
                    + cells[up + x] as u8
                    + cells[up + right] as u8
                    + cells[row + left] as u8
                    + cells[row + right] as u8
                    + cells[down + left] as u8
                    + cells[down + x] as u8
                    + cells[down + right] as u8;

                let index = row + x;
                let state = cells[index].next(neighbors);
                next[index] = state;
                self.pixels[index] = self.config.color_of(state.is_alive());
                population += state as usize;
            }
        }

        mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        trace!("generation {} population {}", self.generation, population);
        population
    }

    fn refresh_pixels(&mut self) {
        for (pixel, cell) in self.pixels.iter_mut().zip(self.current.cells()) {
            *pixel = self.config.color_of(cell.is_alive());
        }
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    /// The latest generation.
    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.current.population()
    }

    /// One texel per cell, row-major, matching [`Simulation::current`].
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// [`Simulation::pixels`] flattened to RGBA8 bytes for texture upload.
    pub fn pixel_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }
}
