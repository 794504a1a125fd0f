use std::fs::File;
use std::io::BufReader;

use rasterflow::config::{Params, RunConfig, Scenario};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    let (params, scenario) = match args.get(6) {
        Some(path) => {
            let file = File::open(path).expect("failed to open config file");
            let cfg: RunConfig =
                serde_json::from_reader(BufReader::new(file)).expect("failed to parse config file");
            (cfg.params, cfg.scenario)
        }
        None => {
            let defaults = Scenario::default();
            let params = Params {
                seed: args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42),
                ..Params::default()
            };
            let scenario = Scenario {
                rows: args.get(2).and_then(|s| s.parse().ok()).unwrap_or(defaults.rows),
                cols: args.get(3).and_then(|s| s.parse().ok()).unwrap_or(defaults.cols),
                steps_per_batch: args
                    .get(4)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.steps_per_batch),
                batches: args.get(5).and_then(|s| s.parse().ok()).unwrap_or(defaults.batches),
                ..defaults
            };
            (params, scenario)
        }
    };

    eprintln!(
        "Simulating {}x{} raster with seed={}, levels={}, {} x {} steps",
        scenario.rows,
        scenario.cols,
        params.seed,
        params.membership_levels,
        scenario.batches,
        scenario.steps_per_batch
    );

    let (report, timings) = match rasterflow::run(&scenario, &params) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&report).expect("report serializes")
    );
}
