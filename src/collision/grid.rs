//! Uniform-cell spatial hash for neighbour queries.
//!
//! Rebuilt from scratch every tick collisions are enabled; bodies move every
//! tick so nothing is kept between rebuilds. Stores body slot indices.

use std::collections::HashMap;

use bevy::math::{DVec2, IVec2};

/// Cell coordinates are clamped to this magnitude so ring offsets around
/// any cell stay inside `i32`.
const CELL_LIMIT: f64 = (1 << 30) as f64;

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<IVec2, Vec<usize>>,
}

impl SpatialGrid {
    /// Create an empty grid. `cell_size` must be positive (validated by the
    /// simulation configuration).
    pub fn new(cell_size: f64) -> Self {
        debug_assert!(cell_size > 0.0);
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Integer cell containing `position`.
    ///
    /// Positions far beyond the cell range share the outermost cell.
    #[inline]
    pub fn cell_of(&self, position: DVec2) -> IVec2 {
        let c = (position / self.cell_size)
            .floor()
            .clamp(DVec2::splat(-CELL_LIMIT), DVec2::splat(CELL_LIMIT));
        IVec2::new(c.x as i32, c.y as i32)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Record body `index` at `position`.
    pub fn insert(&mut self, index: usize, position: DVec2) {
        let cell = self.cell_of(position);
        self.cells.entry(cell).or_default().push(index);
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Bodies in the cell containing `position`.
    pub fn query_cell(&self, position: DVec2) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .get(&self.cell_of(position))
            .into_iter()
            .flat_map(|bodies| bodies.iter().copied())
    }

    /// Candidate bodies that may lie within `reach` of `position`.
    ///
    /// Searches enough rings of neighbouring cells to cover `reach`, so a
    /// body whose centre is within `reach` is always returned no matter
    /// where cell boundaries fall. Candidates are not distance-filtered.
    pub fn query_nearby(&self, position: DVec2, reach: f64) -> impl Iterator<Item = usize> + '_ {
        let center = self.cell_of(position);
        let rings = (reach / self.cell_size).ceil().max(0.0) as i32;

        (-rings..=rings)
            .flat_map(move |dy| (-rings..=rings).map(move |dx| center.saturating_add(IVec2::new(dx, dy))))
            .filter_map(move |cell| self.cells.get(&cell))
            .flat_map(|bodies| bodies.iter().copied())
    }
}
