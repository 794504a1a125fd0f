use rayon::prelude::*;

use crate::grid::Grid;
use crate::particles::Particle;

/// L×L contact counts. Row = origin group of the particle, column = group of
/// the terrain it currently sits on. Sink particles are included, so the
/// grand total equals the particle count and row sums equal origin-group
/// totals.
pub fn contact_matrix(particles: &[Particle], membership: &Grid<u16>, levels: usize) -> Grid<u32> {
    let data = particles
        .par_iter()
        .fold(
            || vec![0u32; levels * levels],
            |mut acc, p| {
                let from = p.group as usize - 1;
                let to = membership.get(p.row, p.col) as usize - 1;
                acc[from * levels + to] += 1;
                acc
            },
        )
        .reduce(
            || vec![0u32; levels * levels],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        );
    Grid {
        data,
        rows: levels,
        cols: levels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_by_current_terrain() {
        let m = Grid::from_rows(&[vec![1, 2], vec![3, 3]]).unwrap();
        let mut moved = Particle::new(0, 1, 2);
        moved.row = 1;
        let ps = vec![
            Particle::new(0, 0, 1),
            Particle::new(0, 1, 2),
            moved,
            Particle::new(1, 0, 3),
        ];
        let c = contact_matrix(&ps, &m, 3);
        assert_eq!(c.to_rows(), vec![vec![1, 0, 0], vec![0, 1, 1], vec![0, 0, 1]]);
        assert_eq!(c.sum(), 4);
    }

    #[test]
    fn no_particles_no_contacts() {
        let m = Grid::from_rows(&[vec![2, 2], vec![2, 2]]).unwrap();
        assert_eq!(contact_matrix(&[], &m, 2).sum(), 0);
    }
}
