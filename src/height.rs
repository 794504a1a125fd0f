use crate::grid::{DIR_COL, DIR_ROW, Grid};

/// Baseline elevation plus a mutable occupancy layer.
///
/// Effective height of a cell is `baseline + current`. The baseline never
/// changes after construction; the current layer is overwritten from particle
/// density at the start of every simulation call and then nudged by one unit
/// per particle move.
#[derive(Clone, Debug)]
pub struct HeightField {
    baseline: Grid<i32>,
    current: Grid<i32>,
}

impl HeightField {
    pub fn new(baseline: Grid<i32>) -> Self {
        let current = Grid::new(baseline.rows, baseline.cols);
        Self { baseline, current }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.baseline.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.baseline.cols
    }

    pub fn baseline(&self) -> &Grid<i32> {
        &self.baseline
    }

    pub fn current(&self) -> &Grid<i32> {
        &self.current
    }

    #[inline]
    pub fn effective(&self, row: usize, col: usize) -> i64 {
        let i = self.baseline.idx(row, col);
        self.baseline.data[i] as i64 + self.current.data[i] as i64
    }

    /// Height drop from (row, col) to each neighbour in direction order
    /// (stay, NW, N, NE, E, SE, S, SW, W). `drops[0]` is always 0.
    ///
    /// Returns None on the border ring: no descent is computed from there.
    /// Heights are widened to i64 so the full i32 baseline range is usable.
    pub fn drops(&self, row: usize, col: usize) -> Option<[i64; 9]> {
        if self.baseline.is_border(row, col) {
            return None;
        }
        let here = self.effective(row, col);
        let mut out = [0i64; 9];
        for d in 1..9 {
            let nr = row.wrapping_add_signed(DIR_ROW[d]);
            let nc = col.wrapping_add_signed(DIR_COL[d]);
            out[d] = here - self.effective(nr, nc);
        }
        Some(out)
    }

    /// Overwrite the occupancy layer from a density snapshot.
    pub fn reset(&mut self, density: &Grid<u32>) {
        debug_assert_eq!(density.shape(), self.current.shape());
        for (dst, &n) in self.current.data.iter_mut().zip(&density.data) {
            *dst = n as i32;
        }
    }

    /// Move one unit of occupancy. A zero-length move is a no-op.
    #[inline]
    pub fn shift(&mut self, from: (usize, usize), to: (usize, usize)) {
        let src = self.current.idx(from.0, from.1);
        let dst = self.current.idx(to.0, to.1);
        self.current.data[src] -= 1;
        self.current.data[dst] += 1;
    }

    /// Total occupancy over the whole raster.
    pub fn mass(&self) -> i64 {
        self.current.data.iter().map(|&v| v as i64).sum()
    }
}
