use crate::grid::CellState::{Alive, Dead};
use rand::Rng;

#[repr(u8)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Alive
    }

    /// Next state under B3/S23 for a cell with `alive_neighbors` live neighbors.
    #[inline]
    pub fn next(self, alive_neighbors: u8) -> CellState {
        match (self, alive_neighbors) {
            (Alive, 2..=3) => Alive, // Survives
            (Dead, 3) => Alive,      // Becomes alive
            _ => Dead,               // Dies or remains dead
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            Alive
        } else {
            Dead
        }
    }
}

/// Row-major cell lattice whose edges wrap around.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// All-dead grid. Both dimensions must be non-zero; [`crate::LifeConfig::validate`]
    /// checks that before a [`crate::Simulation`] builds one.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Grid {
            width,
            height,
            cells: vec![Dead; width * height],
        }
    }

    /// Grid with exactly the listed `(x, y)` cells alive.
    pub fn with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> Self {
        let mut grid = Grid::new(width, height);
        for &(x, y) in alive {
            grid.set(x, y, Alive);
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Linear index of `(x, y)` with both coordinates wrapped onto the torus.
    ///
    /// Neighbor lookups only ever step one cell out of range, where this is
    /// `-1 -> len - 1` and `len -> 0`; larger offsets wrap the same way.
    #[inline]
    pub fn wrap_index(&self, x: isize, y: isize) -> usize {
        let x = x.rem_euclid(self.width as isize) as usize;
        let y = y.rem_euclid(self.height as isize) as usize;
        self.index(x, y)
    }

    pub fn get(&self, x: usize, y: usize) -> CellState {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) {
        let index = self.index(x, y);
        self.cells[index] = state;
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Dead);
    }

    /// Seed every cell independently: alive when a roll in `0..=100` exceeds `alive_threshold`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, alive_threshold: u8) {
        for cell in self.cells.iter_mut() {
            *cell = CellState::from(rng.random_range(0..=100u8) > alive_threshold);
        }
    }

    /// Count the number of alive neighbors for a cell
    pub fn alive_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;

        for dy in [-1, 0, 1] {
            for dx in [-1, 0, 1] {
                if dx == 0 && dy == 0 {
                    // Skip the current cell
                    continue;
                }

                let neighbor = self.wrap_index(x as isize + dx, y as isize + dy);
                count += self.cells[neighbor] as u8;
            }
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn wrap_index_one_step_out() {
        let grid = Grid::new(5, 4);
        assert_eq!(grid.wrap_index(-1, 0), grid.index(4, 0));
        assert_eq!(grid.wrap_index(5, 0), grid.index(0, 0));
        assert_eq!(grid.wrap_index(0, -1), grid.index(0, 3));
        assert_eq!(grid.wrap_index(0, 4), grid.index(0, 0));
        assert_eq!(grid.wrap_index(-1, -1), grid.index(4, 3));
        assert_eq!(grid.wrap_index(5, 4), 0);
    }

    #[test]
    fn rule_table() {
        for n in 0..=8u8 {
            let survive = n == 2 || n == 3;
            assert_eq!(Alive.next(n).is_alive(), survive, "alive with {n} neighbors");
            assert_eq!(Dead.next(n).is_alive(), n == 3, "dead with {n} neighbors");
        }
    }

    #[test]
    fn horizontal_neighbor_across_columns() {
        let grid = Grid::with_alive(6, 6, &[(5, 2)]);
        assert_eq!(grid.alive_neighbors(0, 2), 1);

        let grid = Grid::with_alive(6, 6, &[(0, 2)]);
        assert_eq!(grid.alive_neighbors(5, 2), 1);
    }

    #[test]
    fn vertical_neighbor_across_rows() {
        let grid = Grid::with_alive(6, 6, &[(3, 5)]);
        assert_eq!(grid.alive_neighbors(3, 0), 1);

        let grid = Grid::with_alive(6, 6, &[(3, 0)]);
        assert_eq!(grid.alive_neighbors(3, 5), 1);
    }

    #[test]
    fn corner_sees_opposite_corners() {
        let grid = Grid::with_alive(5, 5, &[(4, 4), (4, 0), (0, 4)]);
        assert_eq!(grid.alive_neighbors(0, 0), 3);
    }

    #[test]
    fn center_is_not_its_own_neighbor() {
        let grid = Grid::with_alive(5, 5, &[(2, 2)]);
        assert_eq!(grid.alive_neighbors(2, 2), 0);
    }

    #[test]
    fn full_grid_has_eight_neighbors_everywhere() {
        let mut grid = Grid::new(4, 4);
        grid.cells_mut().fill(Alive);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(grid.alive_neighbors(x, y), 8);
            }
        }
    }

    #[test]
    fn randomize_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(10, 10);

        grid.randomize(&mut rng, 100);
        assert_eq!(grid.population(), 0);

        grid.clear();
        grid.randomize(&mut rng, 0);
        // Only a roll of exactly 0 leaves a cell dead.
        assert!(grid.population() > 90);
    }

    #[test]
    fn randomize_default_density_is_about_fifteen_percent() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(100, 100);
        grid.randomize(&mut rng, 85);
        let population = grid.population();
        // 15/101 of 10_000 is ~1485.
        assert!((1200..1800).contains(&population), "population {population}");
    }

    proptest! {
        #[test]
        fn wrap_index_matches_edge_rule(
            (width, height, x, y) in (1usize..40, 1usize..40).prop_flat_map(|(w, h)| {
                (Just(w), Just(h), -1..=w as isize, -1..=h as isize)
            }),
        ) {
            let grid = Grid::new(width, height);

            let edge = |v: isize, len: usize| -> usize {
                if v < 0 {
                    len - 1
                } else if v >= len as isize {
                    0
                } else {
                    v as usize
                }
            };

            prop_assert_eq!(grid.wrap_index(x, y), edge(y, height) * width + edge(x, width));
            prop_assert!(grid.wrap_index(x, y) < width * height);
        }
    }
}
