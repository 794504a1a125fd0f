pub mod config;
pub mod contact;
pub mod density;
pub mod descent;
pub mod engine;
pub mod error;
pub mod grid;
pub mod height;
pub mod particles;
pub mod rng;
pub mod scenario;

use std::time::Instant;

use log::info;
use serde::Serialize;

use config::{Params, Scenario};
pub use engine::FlowEngine;
pub use error::FlowError;
pub use grid::Grid;

#[derive(Serialize)]
pub struct Report {
    pub rows: usize,
    pub cols: usize,
    pub particles: usize,
    pub non_sink: usize,
    pub steps: usize,
    pub params: Params,
    /// Row `i` = origin group `i + 1`.
    pub contact: Vec<Vec<u32>>,
    pub group_totals: Vec<u32>,
    pub density: Vec<Vec<u32>>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Build the synthetic coastal raster, run `batches` simulate calls and
/// collect the contact and density matrices.
pub fn run(scenario: &Scenario, params: &Params) -> Result<(Report, Vec<Timing>), FlowError> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Terrain + starting particles
    let t = Instant::now();
    let terrain = scenario::coastal(scenario, params);
    timings.push(Timing {
        name: "terrain",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Engine
    let t = Instant::now();
    let mut engine = FlowEngine::new(
        terrain.baseline,
        terrain.membership,
        &terrain.particles,
        params,
    )?;
    timings.push(Timing {
        name: "engine",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Simulate in batches; each call re-derives occupancy from positions
    let t = Instant::now();
    for b in 0..scenario.batches {
        engine.simulate(scenario.steps_per_batch)?;
        info!(
            "batch {}/{}: {} steps done",
            b + 1,
            scenario.batches,
            (b + 1) * scenario.steps_per_batch
        );
    }
    timings.push(Timing {
        name: "simulate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 4. Aggregate
    let t = Instant::now();
    let contact = engine.contact_matrix();
    let density = engine.density();
    timings.push(Timing {
        name: "aggregate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    let report = Report {
        rows: scenario.rows,
        cols: scenario.cols,
        particles: engine.len(),
        non_sink: engine.non_sink_count(),
        steps: scenario.batches * scenario.steps_per_batch,
        params: params.clone(),
        contact: contact.to_rows(),
        group_totals: engine.group_counts(),
        density: density.to_rows(),
    };

    Ok((report, timings))
}
