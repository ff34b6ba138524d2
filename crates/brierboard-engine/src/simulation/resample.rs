//! Stratified resampling of questions.

use std::collections::BTreeMap;

use rand::Rng;

use crate::fixed_effects::Panel;

/// Questions of one panel grouped by `(forecast due date, source)`.
#[derive(Debug, Clone)]
pub struct Strata {
    groups: Vec<Vec<usize>>,
    n_questions: usize,
}

impl Strata {
    pub fn from_panel(panel: &Panel) -> Self {
        let mut groups: BTreeMap<(chrono::NaiveDate, &str), Vec<usize>> = BTreeMap::new();
        for (i, q) in panel.questions.iter().enumerate() {
            groups
                .entry((q.key.forecast_due_date, q.key.source.as_str()))
                .or_default()
                .push(i);
        }
        Self {
            groups: groups.into_values().collect(),
            n_questions: panel.n_questions(),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Draw each stratum's questions with replacement, as many as it holds, and return
    /// how many times each question was drawn.
    pub fn draw_weights<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        let mut weights = vec![0.0; self.n_questions];
        for group in &self.groups {
            for _ in 0..group.len() {
                weights[group[rng.gen_range(0..group.len())]] += 1.0;
            }
        }
        weights
    }
}

/// Seed for one replicate, derived from the run seed with SplitMix64 so replicate
/// streams do not depend on scheduling.
pub fn replicate_seed(seed: u64, replicate: u32) -> u64 {
    let mut z = seed ^ (u64::from(replicate).wrapping_add(1)).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_effects::PanelQuestion;
    use brierboard_core::types::{QuestionKey, QuestionType};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn panel() -> Panel {
        let d1 = NaiveDate::from_ymd_opt(2024, 7, 21).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 8, 4).unwrap();
        let keys = [
            (d1, "acled"),
            (d1, "acled"),
            (d1, "fred"),
            (d2, "acled"),
            (d2, "acled"),
            (d2, "acled"),
        ];
        Panel {
            question_type: QuestionType::Dataset,
            n_forecasters: 0,
            questions: keys
                .iter()
                .enumerate()
                .map(|(i, (d, s))| PanelQuestion {
                    matrix_index: i,
                    key: QuestionKey::new(*d, *s, i.to_string(), Some(30)),
                })
                .collect(),
            cells: Vec::new(),
        }
    }

    #[test]
    fn test_draws_preserve_stratum_sizes() {
        let strata = Strata::from_panel(&panel());
        assert_eq!(strata.len(), 3);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let w = strata.draw_weights(&mut rng);
            assert_eq!(w[0] + w[1], 2.0);
            assert_eq!(w[2], 1.0);
            assert_eq!(w[3] + w[4] + w[5], 3.0);
        }
    }

    #[test]
    fn test_replicate_seeds_are_distinct_and_stable() {
        let a = replicate_seed(42, 0);
        assert_eq!(a, replicate_seed(42, 0));
        assert_ne!(a, replicate_seed(42, 1));
        assert_ne!(a, replicate_seed(43, 0));
    }
}
