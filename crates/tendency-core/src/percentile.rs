// Percentile mapping against fixed league reference samples.

use crate::numeric::{clamp, round5};

/// An immutable ascending reference sample for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceDistribution {
    pub metric: &'static str,
    pub samples: &'static [f64],
}

impl ReferenceDistribution {
    /// Map `value` into `[floor, cap]` by its rank in this sample.
    pub fn tendency(&self, value: f64, cap: u32, floor: u32) -> u32 {
        percentile_to_tendency(value, self.samples, cap, floor)
    }
}

// Rough league-wide baselines.
pub const USAGE: ReferenceDistribution = ReferenceDistribution {
    metric: "usg_pct",
    samples: &[15.0, 17.0, 18.0, 20.0, 21.0, 22.0, 23.0, 24.0, 25.0, 27.0, 30.0, 33.0],
};
pub const TOUCHES: ReferenceDistribution = ReferenceDistribution {
    metric: "touches_per_game",
    samples: &[20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0],
};
pub const FIELD_GOAL_ATTEMPTS: ReferenceDistribution = ReferenceDistribution {
    metric: "fga",
    samples: &[6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0],
};
pub const DRIVES: ReferenceDistribution = ReferenceDistribution {
    metric: "drives_per_game",
    samples: &[0.0, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 15.0],
};
pub const STEALS: ReferenceDistribution = ReferenceDistribution {
    metric: "stl",
    samples: &[0.3, 0.5, 0.7, 0.9, 1.1, 1.5, 2.0],
};
pub const BLOCKS: ReferenceDistribution = ReferenceDistribution {
    metric: "blk",
    samples: &[0.1, 0.3, 0.5, 0.8, 1.2, 2.0, 3.0],
};
pub const FOULS: ReferenceDistribution = ReferenceDistribution {
    metric: "pf",
    samples: &[1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0],
};
pub const ASSIST_RATE: ReferenceDistribution = ReferenceDistribution {
    metric: "ast_pct",
    samples: &[5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0],
};

/// Every built-in reference curve.
pub const REFERENCES: &[ReferenceDistribution] = &[
    USAGE,
    TOUCHES,
    FIELD_GOAL_ATTEMPTS,
    DRIVES,
    STEALS,
    BLOCKS,
    FOULS,
    ASSIST_RATE,
];

/// Look up a reference curve by metric key.
pub fn reference(metric: &str) -> Option<&'static ReferenceDistribution> {
    REFERENCES.iter().find(|r| r.metric == metric)
}

/// Rank `value` within `reference` and interpolate into `[floor, cap]`.
///
/// The rank is the inclusive fraction of finite samples `<= value`. The
/// interpolated value is rounded to the nearest 5 and clamped again, since
/// rounding can step one increment past either bound. An empty (or all
/// non-finite) reference yields the floor.
pub fn percentile_to_tendency(value: f64, reference: &[f64], cap: u32, floor: u32) -> u32 {
    let (lo, hi) = (floor as f64, cap as f64);
    let cleaned: Vec<f64> = reference.iter().copied().filter(|v| v.is_finite()).collect();
    if cleaned.is_empty() {
        return clamp(round5(lo), lo, hi) as u32;
    }
    let at_or_below = cleaned.iter().filter(|&&x| x <= value).count();
    let pct = at_or_below as f64 / cleaned.len() as f64;
    let raw = lo + pct * (hi - lo);
    clamp(round5(clamp(raw, lo, hi)), lo, hi) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reference_returns_floor() {
        assert_eq!(percentile_to_tendency(10.0, &[], 60, 15), 15);
        assert_eq!(percentile_to_tendency(10.0, &[f64::NAN, f64::NAN], 60, 15), 15);
    }

    #[test]
    fn below_every_sample_is_floor() {
        assert_eq!(DRIVES.tendency(-1.0, 60, 15), 15);
    }

    #[test]
    fn above_every_sample_is_cap() {
        assert_eq!(DRIVES.tendency(40.0, 60, 15), 60);
    }

    #[test]
    fn rank_is_inclusive() {
        // 7 of 8 samples are <= 35 -> 15 + 0.875 * 40 = 50
        assert_eq!(ASSIST_RATE.tendency(35.0, 55, 15), 50);
        // 5 of 8 drive samples are <= 5 -> 15 + 0.625 * 45 = 43.1 -> 45
        assert_eq!(DRIVES.tendency(5.0, 60, 15), 45);
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        let reference = [1.0, f64::NAN, 3.0];
        // 1 of 2 finite samples -> 0 + 0.5 * 60 = 30
        assert_eq!(percentile_to_tendency(2.0, &reference, 60, 0), 30);
    }

    #[test]
    fn nan_value_ranks_lowest() {
        assert_eq!(STEALS.tendency(f64::NAN, 60, 10), 10);
    }

    #[test]
    fn result_stays_on_grid_and_in_bounds() {
        for i in 0..200 {
            let v = i as f64 * 0.25;
            let t = TOUCHES.tendency(v, 65, 20);
            assert!((20..=65).contains(&t));
            assert_eq!(t % 5, 0);
        }
    }

    #[test]
    fn lookup_by_metric() {
        assert_eq!(reference("usg_pct").map(|r| r.samples.len()), Some(12));
        // 4 of 8 samples are <= 12 -> 10 + 0.5 * 50 = 35
        assert_eq!(reference("fga").map(|r| r.tendency(12.0, 60, 10)), Some(35));
        assert!(reference("minutes").is_none());
    }

    #[test]
    fn references_are_ascending() {
        for r in REFERENCES {
            assert!(r.samples.windows(2).all(|w| w[0] <= w[1]), "{}", r.metric);
        }
    }
}
