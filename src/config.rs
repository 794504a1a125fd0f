use serde::{Deserialize, Serialize};

/// Engine parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Number of membership groups L; valid groups are `1..=L`, group 1 is the sink.
    pub membership_levels: usize,
    /// Seed for the tie-break generator.
    pub seed: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            membership_levels: 4,
            seed: 42,
        }
    }
}

/// Synthetic coastal raster plus run length, used by the CLI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub rows: usize,
    pub cols: usize,
    /// Bottom rows tagged as sink group (sea).
    pub sea_rows: usize,
    /// Elevation gained per row moving away from the sea.
    pub slope: i32,
    /// Max per-cell hash jitter added on land.
    pub jitter: u32,
    pub steps_per_batch: usize,
    pub batches: usize,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            rows: 64,
            cols: 96,
            sea_rows: 8,
            slope: 3,
            jitter: 4,
            steps_per_batch: 10,
            batches: 5,
        }
    }
}

/// On-disk form accepted by the CLI: both sections optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub params: Params,
    pub scenario: Scenario,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: RunConfig =
            serde_json::from_str(r#"{"params":{"seed":7},"scenario":{"rows":10}}"#).unwrap();
        assert_eq!(cfg.params.seed, 7);
        assert_eq!(cfg.params.membership_levels, Params::default().membership_levels);
        assert_eq!(cfg.scenario.rows, 10);
        assert_eq!(cfg.scenario.cols, Scenario::default().cols);
    }
}
