use log::{debug, trace};

use crate::config::Params;
use crate::contact::contact_matrix;
use crate::density::{density, density_of};
use crate::descent::DescentSelector;
use crate::error::FlowError;
use crate::grid::{Grid, step};
use crate::height::HeightField;
use crate::particles::{Particle, ParticleSet};

/// Sparse particle flow over an elevation raster.
///
/// Owns the height field, the particle list and the tie-break generator.
/// All mutation happens inside [`FlowEngine::simulate`] and
/// [`FlowEngine::add_particles`]; queries are read-only.
#[derive(Clone, Debug)]
pub struct FlowEngine {
    field: HeightField,
    membership: Grid<u16>,
    particles: ParticleSet,
    selector: DescentSelector,
    levels: usize,
}

impl FlowEngine {
    /// Build an engine from a baseline raster, a same-shaped membership
    /// raster (values `1..=levels`) and the initial particle coordinates.
    pub fn new(
        baseline: Grid<i32>,
        membership: Grid<u16>,
        initial: &[(usize, usize)],
        params: &Params,
    ) -> Result<Self, FlowError> {
        if baseline.shape() != membership.shape() {
            return Err(FlowError::ShapeMismatch {
                height: baseline.shape(),
                membership: membership.shape(),
            });
        }
        let levels = params.membership_levels;
        for (i, &value) in membership.data.iter().enumerate() {
            if value == 0 || value as usize > levels {
                return Err(FlowError::MembershipOutOfRange {
                    row: i / membership.cols,
                    col: i % membership.cols,
                    value,
                    levels,
                });
            }
        }
        check_bounds(initial, &membership)?;

        let mut particles = ParticleSet::new();
        particles.append(initial, &membership);

        Ok(Self {
            field: HeightField::new(baseline),
            membership,
            particles,
            selector: DescentSelector::new(params.seed),
            levels,
        })
    }

    /// Advance every non-sink particle `steps` times.
    ///
    /// The occupancy layer is rebuilt from the current particle density on
    /// entry. Within a step particles move in index order and each move is
    /// written to the occupancy layer immediately, so later particles see
    /// the result of earlier ones.
    ///
    /// On error the state is left as it was at the failing move.
    pub fn simulate(&mut self, steps: usize) -> Result<(), FlowError> {
        let snapshot = self.density();
        self.field.reset(&snapshot);
        debug!(
            "simulate: {} steps, {} particles, mass {}",
            steps,
            self.particles.len(),
            self.field.mass()
        );

        for s in 0..steps {
            let mut moved = 0usize;
            for p in self.particles.as_mut_slice() {
                if p.is_sink() {
                    continue;
                }
                let from = p.pos();
                let dir = self.selector.select(&self.field, from.0, from.1)?;
                let to = step(from.0, from.1, dir);
                p.row = to.0;
                p.col = to.1;
                self.field.shift(from, to);
                if from != to {
                    moved += 1;
                }
            }
            trace!("step {}: {} particles moved", s, moved);
        }
        Ok(())
    }

    /// Direction the engine would pick for a particle at (row, col) given the
    /// current occupancy layer. Consumes a draw from the engine's generator
    /// exactly as a move would.
    pub fn descent_direction(&mut self, row: usize, col: usize) -> Result<u8, FlowError> {
        self.selector.select(&self.field, row, col)
    }

    /// Append particles at the given cells. The batch is rejected whole if
    /// any coordinate is off the raster.
    pub fn add_particles(&mut self, coords: &[(usize, usize)]) -> Result<(), FlowError> {
        check_bounds(coords, &self.membership)?;
        self.particles.append(coords, &self.membership);
        Ok(())
    }

    /// L×L origin-group × terrain-group counts over all particles.
    pub fn contact_matrix(&self) -> Grid<u32> {
        contact_matrix(self.particles.as_slice(), &self.membership, self.levels)
    }

    /// Per-cell count of non-sink particles.
    pub fn density(&self) -> Grid<u32> {
        density(
            self.particles.as_slice(),
            self.field.rows(),
            self.field.cols(),
        )
    }

    /// Per-cell count of the indexed particles, sinks included.
    pub fn density_of(&self, indices: &[usize]) -> Result<Grid<u32>, FlowError> {
        density_of(
            self.particles.as_slice(),
            indices,
            self.field.rows(),
            self.field.cols(),
        )
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    pub fn membership(&self) -> &Grid<u16> {
        &self.membership
    }

    pub fn membership_levels(&self) -> usize {
        self.levels
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn non_sink_count(&self) -> usize {
        self.particles.non_sink_count()
    }

    /// Particle totals per origin group.
    pub fn group_counts(&self) -> Vec<u32> {
        self.particles.group_counts(self.levels)
    }
}

fn check_bounds(coords: &[(usize, usize)], raster: &Grid<u16>) -> Result<(), FlowError> {
    match coords.iter().find(|&&(r, c)| !raster.contains(r, c)) {
        Some(&(row, col)) => Err(FlowError::CellOutOfBounds {
            row,
            col,
            rows: raster.rows,
            cols: raster.cols,
        }),
        None => Ok(()),
    }
}
