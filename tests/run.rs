use rasterflow::config::{Params, Scenario};

#[test]
fn pipeline_reports_consistent_totals() {
    let scenario = Scenario {
        rows: 24,
        cols: 30,
        steps_per_batch: 4,
        batches: 3,
        ..Scenario::default()
    };
    let params = Params::default();
    let (report, timings) = rasterflow::run(&scenario, &params).unwrap();

    assert_eq!(report.particles, 22 * 28);
    assert_eq!(report.steps, 12);
    assert_eq!(report.contact.len(), params.membership_levels);
    let contact_total: u32 = report.contact.iter().flatten().sum();
    assert_eq!(contact_total as usize, report.particles);
    let density_total: u32 = report.density.iter().flatten().sum();
    assert_eq!(density_total as usize, report.non_sink);
    assert_eq!(report.group_totals.iter().sum::<u32>() as usize, report.particles);
    assert_eq!(timings.last().map(|t| t.name), Some("TOTAL"));
}

#[test]
fn pipeline_is_deterministic() {
    let scenario = Scenario {
        rows: 16,
        cols: 16,
        batches: 2,
        ..Scenario::default()
    };
    let params = Params {
        seed: 99,
        ..Params::default()
    };
    let (a, _) = rasterflow::run(&scenario, &params).unwrap();
    let (b, _) = rasterflow::run(&scenario, &params).unwrap();
    assert_eq!(a.contact, b.contact);
    assert_eq!(a.density, b.density);
}

#[test]
fn report_serializes() {
    let scenario = Scenario {
        rows: 8,
        cols: 8,
        sea_rows: 2,
        batches: 1,
        ..Scenario::default()
    };
    let (report, _) = rasterflow::run(&scenario, &Params::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["rows"], 8);
    assert_eq!(json["params"]["seed"], 42);
    assert!(json["contact"].is_array());
}
