use rayon::prelude::*;

use crate::error::FlowError;
use crate::grid::Grid;
use crate::particles::Particle;

/// Smallest particle batch worth a parallel accumulator.
const MIN_BATCH: usize = 4096;

/// Occupancy count of every non-sink particle at its current cell.
///
/// Each parallel batch holds at least as many particles as the raster has
/// cells, so accumulator memory never exceeds the particle list itself.
/// Sparse sets on large rasters take the sequential path.
pub fn density(particles: &[Particle], rows: usize, cols: usize) -> Grid<u32> {
    let batch = (rows * cols).max(MIN_BATCH);
    let data = if particles.len() <= batch {
        count(particles, rows, cols)
    } else {
        particles
            .par_chunks(batch)
            .map(|chunk| count(chunk, rows, cols))
            .reduce(|| vec![0u32; rows * cols], merge)
    };
    Grid { data, rows, cols }
}

fn count(particles: &[Particle], rows: usize, cols: usize) -> Vec<u32> {
    let mut acc = vec![0u32; rows * cols];
    for p in particles.iter().filter(|p| !p.is_sink()) {
        acc[p.row * cols + p.col] += 1;
    }
    acc
}

/// Occupancy count of the indexed particles only. No group filtering:
/// excluding sinks is up to the caller. Repeated indices count repeatedly.
pub fn density_of(
    particles: &[Particle],
    indices: &[usize],
    rows: usize,
    cols: usize,
) -> Result<Grid<u32>, FlowError> {
    let mut out = Grid::new(rows, cols);
    for &index in indices {
        let p = particles
            .get(index)
            .ok_or(FlowError::ParticleIndexOutOfRange {
                index,
                len: particles.len(),
            })?;
        let i = out.idx(p.row, p.col);
        out.data[i] += 1;
    }
    Ok(out)
}

fn merge(mut a: Vec<u32>, b: Vec<u32>) -> Vec<u32> {
    for (x, y) in a.iter_mut().zip(b) {
        *x += y;
    }
    a
}
