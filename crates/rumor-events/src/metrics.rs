//! Per-round metric snapshots.

use serde::{Deserialize, Serialize};

/// Counts taken after one round has been committed.
///
/// Entry `L` of `attained` is the number of agents holding level-`L`
/// knowledge (everybody knows, to depth `L + 1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundMetrics {
    pub round: u64,
    pub heard: usize,
    pub attained: Vec<usize>,
}

impl RoundMetrics {
    /// Count of agents holding the given level, zero for levels past the depth.
    pub fn attained_at(&self, level: usize) -> usize {
        self.attained.get(level).copied().unwrap_or(0)
    }

    /// Count of agents holding the deepest configured level.
    pub fn top_level(&self) -> usize {
        self.attained.last().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attained_lookup() {
        let metrics = RoundMetrics {
            round: 3,
            heard: 5,
            attained: vec![4, 1],
        };

        assert_eq!(metrics.attained_at(0), 4);
        assert_eq!(metrics.attained_at(1), 1);
        assert_eq!(metrics.attained_at(2), 0);
        assert_eq!(metrics.top_level(), 1);
    }

    #[test]
    fn test_metrics_json_shape() {
        let metrics = RoundMetrics {
            round: 0,
            heard: 1,
            attained: vec![0, 0],
        };
        let json = serde_json::to_string(&metrics).unwrap();
        assert_eq!(json, r#"{"round":0,"heard":1,"attained":[0,0]}"#);
    }
}
