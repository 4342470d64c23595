//! Uniform spatial grid for neighbour queries
//!
//! Rebuilt from scratch every step with a counting sort, so each cell's
//! particle indices are contiguous in one array.

use primordia_math::{Bound2, Vec2};

use crate::particle::Particle;

/// Most cells along one axis; larger bounds get proportionally larger cells
pub const MAX_AXIS_CELLS: usize = 1024;

/// Up to nine distinct cells around a query point
#[derive(Clone, Copy, Debug)]
pub struct NeighborCells {
    cells: [usize; 9],
    len: usize,
}

impl NeighborCells {
    fn push_unique(&mut self, cell: usize) {
        if !self.cells[..self.len].contains(&cell) {
            self.cells[self.len] = cell;
            self.len += 1;
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.cells[..self.len]
    }
}

/// Bucketed particle indices over the simulation bound
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cols: usize,
    rows: usize,
    cell_size: Vec2,
    /// Prefix offsets into `entries`, one per cell plus a terminator
    cell_start: Vec<u32>,
    /// Particle indices ordered by cell
    entries: Vec<u32>,
    cell_of: Vec<u32>,
    cursor: Vec<u32>,
}

impl SpatialGrid {
    /// Create a grid whose cells are at least `min_cell` on each side
    pub fn new(bound: Bound2, min_cell: f32) -> Self {
        let mut grid = Self {
            cols: 1,
            rows: 1,
            cell_size: bound.size(),
            cell_start: Vec::new(),
            entries: Vec::new(),
            cell_of: Vec::new(),
            cursor: Vec::new(),
        };
        grid.resize(bound, min_cell);
        grid
    }

    /// Re-layout the grid for a new bound; contents are cleared
    ///
    /// Cells never drop below `min_cell`, and each axis holds at most
    /// `MAX_AXIS_CELLS` of them.
    pub fn resize(&mut self, bound: Bound2, min_cell: f32) {
        self.cols = axis_cells(bound.width, min_cell);
        self.rows = axis_cells(bound.height, min_cell);
        self.cell_size = Vec2::new(
            bound.width / self.cols as f32,
            bound.height / self.rows as f32,
        );
        self.cell_start.clear();
        self.cell_start.resize(self.cell_count() + 1, 0);
        self.entries.clear();
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Column and row containing `p`, clamped to the grid
    pub fn cell_coords(&self, p: Vec2) -> (usize, usize) {
        let col = (p.x / self.cell_size.x).floor().max(0.0) as usize;
        let row = (p.y / self.cell_size.y).floor().max(0.0) as usize;
        (col.min(self.cols - 1), row.min(self.rows - 1))
    }

    #[inline]
    fn cell_index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Bucket every particle by cell
    pub fn rebuild(&mut self, particles: &[Particle]) {
        let n_cells = self.cell_count();
        self.cell_start.clear();
        self.cell_start.resize(n_cells + 1, 0);
        self.cell_of.clear();

        for p in particles {
            let (col, row) = self.cell_coords(p.position);
            let cell = self.cell_index(col, row);
            self.cell_of.push(cell as u32);
            self.cell_start[cell + 1] += 1;
        }

        for i in 0..n_cells {
            self.cell_start[i + 1] += self.cell_start[i];
        }

        self.cursor.clear();
        self.cursor.extend_from_slice(&self.cell_start[..n_cells]);
        self.entries.clear();
        self.entries.resize(particles.len(), 0);
        for (i, &cell) in self.cell_of.iter().enumerate() {
            let slot = &mut self.cursor[cell as usize];
            self.entries[*slot as usize] = i as u32;
            *slot += 1;
        }
    }

    /// Particle indices bucketed in `cell`
    pub fn cell_entries(&self, cell: usize) -> &[u32] {
        let start = self.cell_start[cell] as usize;
        let end = self.cell_start[cell + 1] as usize;
        &self.entries[start..end]
    }

    /// The 3x3 block of cells around `p`, wrapping at the edges when `wrap` is set
    pub fn neighbor_cells(&self, p: Vec2, wrap: bool) -> NeighborCells {
        let (col, row) = self.cell_coords(p);
        let mut out = NeighborCells {
            cells: [0; 9],
            len: 0,
        };
        for dy in -1i64..=1 {
            let Some(r) = offset(row, dy, self.rows, wrap) else {
                continue;
            };
            for dx in -1i64..=1 {
                let Some(c) = offset(col, dx, self.cols, wrap) else {
                    continue;
                };
                out.push_unique(self.cell_index(c, r));
            }
        }
        out
    }

    /// Visit every particle index that could lie within one cell of `p`
    pub fn for_each_candidate(&self, p: Vec2, wrap: bool, mut f: impl FnMut(usize)) {
        for &cell in self.neighbor_cells(p, wrap).as_slice() {
            for &idx in self.cell_entries(cell) {
                f(idx as usize);
            }
        }
    }
}

fn offset(base: usize, delta: i64, len: usize, wrap: bool) -> Option<usize> {
    let v = base as i64 + delta;
    let len = len as i64;
    if wrap {
        Some(v.rem_euclid(len) as usize)
    } else if v < 0 || v >= len {
        None
    } else {
        Some(v as usize)
    }
}

fn axis_cells(extent: f32, min_cell: f32) -> usize {
    // Float-to-int casts saturate, so huge extents land on the cap
    ((extent / min_cell).floor() as usize).clamp(1, MAX_AXIS_CELLS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), 0.0)
    }

    #[test]
    fn test_layout_respects_min_cell() {
        let grid = SpatialGrid::new(Bound2::new(100.0, 45.0), 10.0);
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.rows(), 4);
        assert!(grid.cell_size().y >= 10.0);
    }

    #[test]
    fn test_tiny_bound_has_one_cell() {
        let grid = SpatialGrid::new(Bound2::new(5.0, 5.0), 10.0);
        assert_eq!(grid.cell_count(), 1);
    }

    #[test]
    fn test_huge_bound_caps_cell_count() {
        let mut grid = SpatialGrid::new(Bound2::new(1.0e6, 1.0e6), 5.0);
        assert_eq!(grid.cols(), MAX_AXIS_CELLS);
        assert_eq!(grid.rows(), MAX_AXIS_CELLS);
        // Cells stretch instead of shrinking below the neighbourhood radius
        assert!(grid.cell_size().x >= 5.0);
        assert!((grid.cell_size().x - 1.0e6 / MAX_AXIS_CELLS as f32).abs() < 1.0);

        grid.rebuild(&[particle_at(999_999.0, 3.0)]);
        let (col, row) = grid.cell_coords(Vec2::new(999_999.0, 3.0));
        assert_eq!((col, row), (MAX_AXIS_CELLS - 1, 0));
        assert_eq!(grid.cell_entries(col), &[0]);
    }

    #[test]
    fn test_rebuild_buckets_every_particle() {
        let mut grid = SpatialGrid::new(Bound2::new(30.0, 30.0), 10.0);
        let particles = vec![
            particle_at(1.0, 1.0),
            particle_at(25.0, 25.0),
            particle_at(2.0, 3.0),
            particle_at(30.0, 30.0), // on the far edge, clamped into the last cell
        ];
        grid.rebuild(&particles);

        assert_eq!(grid.cell_entries(0), &[0, 2]);
        assert_eq!(grid.cell_entries(8), &[1, 3]);
        let total: usize = (0..grid.cell_count()).map(|c| grid.cell_entries(c).len()).sum();
        assert_eq!(total, particles.len());
    }

    #[test]
    fn test_neighbor_cells_clamped_at_corner() {
        let grid = SpatialGrid::new(Bound2::new(30.0, 30.0), 10.0);
        let cells = grid.neighbor_cells(Vec2::new(1.0, 1.0), false);
        assert_eq!(cells.as_slice().len(), 4);
    }

    #[test]
    fn test_neighbor_cells_wrap_at_corner() {
        let grid = SpatialGrid::new(Bound2::new(40.0, 40.0), 10.0);
        let cells = grid.neighbor_cells(Vec2::new(1.0, 1.0), true);
        assert_eq!(cells.as_slice().len(), 9);
        // Opposite corner is a wrapped neighbour
        assert!(cells.as_slice().contains(&15));
    }

    #[test]
    fn test_neighbor_cells_deduplicated_on_narrow_grid() {
        let grid = SpatialGrid::new(Bound2::new(20.0, 20.0), 10.0);
        let cells = grid.neighbor_cells(Vec2::new(1.0, 1.0), true);
        assert_eq!(cells.as_slice().len(), 4);
    }

    #[test]
    fn test_for_each_candidate_finds_neighbour() {
        let mut grid = SpatialGrid::new(Bound2::new(50.0, 50.0), 10.0);
        let particles = vec![particle_at(9.0, 9.0), particle_at(11.0, 11.0), particle_at(45.0, 45.0)];
        grid.rebuild(&particles);

        let mut found = Vec::new();
        grid.for_each_candidate(Vec2::new(9.0, 9.0), false, |i| found.push(i));
        found.sort();
        assert_eq!(found, vec![0, 1]);
    }
}
