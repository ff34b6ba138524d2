//! Rank assignment and row ordering.

use std::cmp::Ordering;

use brierboard_core::constants::LEADERBOARD_DECIMAL_PLACES;

use super::types::LeaderboardRow;

/// Round to the published precision.
pub fn round_published(value: f64) -> f64 {
    let scale = 10f64.powi(LEADERBOARD_DECIMAL_PLACES as i32);
    (value * scale).round() / scale
}

/// "min" ranks (1, 2, 2, 4) on the published precision, so displayed ties share a rank.
/// Undefined scores are unranked.
pub fn min_ranks(scores: &[Option<f64>]) -> Vec<Option<u32>> {
    let rounded: Vec<Option<f64>> = scores.iter().map(|s| s.map(round_published)).collect();
    rounded
        .iter()
        .map(|s| {
            s.map(|s| {
                let better = rounded.iter().flatten().filter(|o| **o < s).count();
                better as u32 + 1
            })
        })
        .collect()
}

/// Ranked rows first by rank, then unranked; ties by team and model.
pub fn sort_rows(rows: &mut [LeaderboardRow]) {
    rows.sort_by(|a, b| {
        let by_rank = match (a.rank, b.rank) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_rank
            .then_with(|| {
                let (x, y) = (a.overall.score, b.overall.score);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.forecaster.cmp(&b.forecaster))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_ranks_share_ties() {
        let ranks = min_ranks(&[Some(0.2), Some(0.1), Some(0.2), None, Some(0.3)]);
        assert_eq!(ranks, vec![Some(2), Some(1), Some(2), None, Some(4)]);
    }

    #[test]
    fn test_ties_at_published_precision() {
        let ranks = min_ranks(&[Some(0.12341), Some(0.12339), Some(0.1236)]);
        assert_eq!(ranks, vec![Some(1), Some(1), Some(3)]);
    }

    #[test]
    fn test_round_published() {
        assert_eq!(round_published(0.12345), 0.123);
        assert_eq!(round_published(0.1236), 0.124);
    }
}
