use serde::Serialize;

/// Row-major flat grid addressed as (row, col). Used for every raster layer
/// and for the L×L contact matrix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub rows: usize,
    pub cols: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); rows * cols],
            rows,
            cols,
        }
    }

    /// Build from nested rows. Returns None if the rows are ragged.
    pub fn from_rows(rows: &[Vec<T>]) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self {
            data: rows.iter().flatten().copied().collect(),
            rows: rows.len(),
            cols,
        })
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// True for the outermost ring of cells.
    #[inline]
    pub fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 == self.rows || col + 1 == self.cols
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[T]>::to_vec).collect()
    }
}

impl<T: Copy + Default + std::iter::Sum<T>> Grid<T> {
    pub fn sum(&self) -> T {
        self.data.iter().copied().sum()
    }
}

/// Row offsets for directions 0..=8: stay, NW, N, NE, E, SE, S, SW, W.
pub const DIR_ROW: [isize; 9] = [0, -1, -1, -1, 0, 1, 1, 1, 0];
/// Column offsets matching `DIR_ROW`.
pub const DIR_COL: [isize; 9] = [0, -1, 0, 1, 1, 1, 0, -1, -1];

/// Apply direction `dir` to (row, col). Caller guarantees the result stays on
/// the grid, which holds for any interior cell.
#[inline]
pub fn step(row: usize, col: usize, dir: u8) -> (usize, usize) {
    let d = dir as usize;
    (
        row.wrapping_add_signed(DIR_ROW[d]),
        col.wrapping_add_signed(DIR_COL[d]),
    )
}
