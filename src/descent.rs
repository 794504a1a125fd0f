use crate::error::FlowError;
use crate::height::HeightField;
use crate::rng::{FlowRng, MAX_CHOICES};

/// Direction index meaning "stay in place".
pub const STAY: u8 = 0;

/// Picks a steepest-descent direction, breaking ties uniformly at random.
#[derive(Clone, Debug)]
pub struct DescentSelector {
    rng: FlowRng,
}

impl DescentSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: FlowRng::new(seed),
        }
    }

    /// Direction in `0..=8` for a particle at (row, col).
    ///
    /// Border cells always answer `STAY` without touching the generator.
    /// Interior cells collect every direction reaching the maximal drop
    /// (stay included, with drop 0) and draw one of them.
    pub fn select(
        &mut self,
        field: &HeightField,
        row: usize,
        col: usize,
    ) -> Result<u8, FlowError> {
        let Some(drops) = field.drops(row, col) else {
            return Ok(STAY);
        };
        let max_drop = drops.iter().copied().max().unwrap_or(0);

        let mut ties = [0u8; MAX_CHOICES];
        let mut n = 0;
        for (d, &drop) in drops.iter().enumerate() {
            if drop == max_drop {
                ties[n] = d as u8;
                n += 1;
            }
        }
        if n == 0 {
            return Err(FlowError::EmptyTieSet { row, col });
        }

        Ok(ties[self.rng.pick(n)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn field(rows: &[Vec<i32>]) -> HeightField {
        HeightField::new(Grid::from_rows(rows).unwrap())
    }

    #[test]
    fn unique_steepest_wins() {
        let f = field(&[
            vec![9, 9, 9],
            vec![9, 5, 9],
            vec![9, 9, 1],
        ]);
        let mut sel = DescentSelector::new(0);
        for _ in 0..20 {
            assert_eq!(sel.select(&f, 1, 1).unwrap(), 5);
        }
    }

    #[test]
    fn pit_stays() {
        let f = field(&[vec![3; 3], vec![3, 0, 3], vec![3; 3]]);
        let mut sel = DescentSelector::new(0);
        assert_eq!(sel.select(&f, 1, 1).unwrap(), STAY);
    }

    #[test]
    fn flat_ties_include_stay() {
        let f = field(&[vec![4; 3], vec![4; 3], vec![4; 3]]);
        let mut sel = DescentSelector::new(5);
        let mut seen = [false; 9];
        for _ in 0..2000 {
            seen[sel.select(&f, 1, 1).unwrap() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn border_is_stay() {
        let f = field(&[vec![9, 0, 9], vec![9, 9, 9], vec![9, 9, 9]]);
        let mut sel = DescentSelector::new(1);
        assert_eq!(sel.select(&f, 0, 0).unwrap(), STAY);
        assert_eq!(sel.select(&f, 2, 1).unwrap(), STAY);
    }
}
