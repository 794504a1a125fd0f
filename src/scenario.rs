use crate::config::{Params, Scenario};
use crate::grid::Grid;
use crate::particles::SINK_GROUP;
use crate::rng::{hash2, seed_u32};

const SALT_JITTER: u64 = 0x5EA_C0A5_7000_0001;

/// Rasters and starting cells for one engine.
pub struct Terrain {
    pub baseline: Grid<i32>,
    pub membership: Grid<u16>,
    pub particles: Vec<(usize, usize)>,
}

/// Coastal ramp: land slopes down towards `sea_rows` rows of sink group at
/// the bottom edge. Land is split into `L - 1` vertical zones (groups
/// `2..=L`). One particle is seeded on every interior cell.
pub fn coastal(scenario: &Scenario, params: &Params) -> Terrain {
    let rows = scenario.rows;
    let cols = scenario.cols;
    let levels = params.membership_levels.max(1);
    let shore = rows.saturating_sub(scenario.sea_rows);
    let jitter_seed = seed_u32(params.seed, SALT_JITTER);

    let mut baseline = Grid::new(rows, cols);
    let mut membership = Grid::new(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            if r >= shore || levels < 2 {
                membership.set(r, c, SINK_GROUP);
                continue;
            }
            let zone = 2 + c * (levels - 1) / cols;
            membership.set(r, c, zone as u16);

            let rise = (shore - r) as i32 * scenario.slope;
            let noise = if scenario.jitter > 0 {
                (hash2(r, c, jitter_seed) % (scenario.jitter + 1)) as i32
            } else {
                0
            };
            baseline.set(r, c, rise + noise);
        }
    }

    let particles = (1..rows.saturating_sub(1))
        .flat_map(|r| (1..cols.saturating_sub(1)).map(move |c| (r, c)))
        .collect();

    Terrain {
        baseline,
        membership,
        particles,
    }
}
