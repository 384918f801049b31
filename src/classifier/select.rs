use std::cmp::Ordering;

use super::vocab::LabelTable;

/// Label reported when no class can be named, e.g. when the score vector
/// or label table is empty.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Outcome of a classification call.
///
/// `Unknown` is a distinct variant rather than a magic label string so the
/// caller can react to it, while `label()` still renders the sentinel for
/// display.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Class { label: String, score: f32 },
    Unknown,
}

impl Prediction {
    /// The label to display, with the sentinel for `Unknown`.
    pub fn label(&self) -> &str {
        match self {
            Prediction::Class { label, .. } => label,
            Prediction::Unknown => UNKNOWN_LABEL,
        }
    }

    /// The winning score, if a class was selected.
    pub fn score(&self) -> Option<f32> {
        match self {
            Prediction::Class { score, .. } => Some(*score),
            Prediction::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Prediction::Unknown)
    }
}

/// Picks the arg-max class from a score vector.
///
/// The first index attaining the maximum wins; a later score must be
/// strictly greater to replace the current best, so ties resolve to the
/// left. NaN scores never compare greater and are passed over; a score
/// vector of nothing but NaN selects no class. Scores beyond the label
/// table length are never considered, and an empty score vector or label
/// table yields [`Prediction::Unknown`].
pub fn select(scores: &[f32], labels: &LabelTable) -> Prediction {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().take(labels.len()).enumerate() {
        let replace = match best {
            None => !score.is_nan(),
            Some((_, top)) => matches!(score.partial_cmp(&top), Some(Ordering::Greater)),
        };
        if replace {
            best = Some((index, score));
        }
    }

    match best {
        Some((index, score)) => match labels.get(index) {
            Some(label) => Prediction::Class {
                label: label.to_string(),
                score,
            },
            None => Prediction::Unknown,
        },
        None => Prediction::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> LabelTable {
        LabelTable::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_picks_max_score() {
        let prediction = select(&[0.1, 0.9, 0.3], &labels(&["a", "b", "c"]));
        assert_eq!(
            prediction,
            Prediction::Class { label: "b".to_string(), score: 0.9 }
        );
    }

    #[test]
    fn test_tie_goes_to_first_index() {
        let prediction = select(&[0.5, 0.5], &labels(&["a", "b"]));
        assert_eq!(prediction.label(), "a");
    }

    #[test]
    fn test_empty_scores_yield_unknown() {
        assert!(select(&[], &labels(&["a", "b"])).is_unknown());
    }

    #[test]
    fn test_empty_labels_yield_unknown() {
        assert!(select(&[0.4, 0.6], &labels(&[])).is_unknown());
    }

    #[test]
    fn test_scores_beyond_label_table_ignored() {
        // Highest score sits past the last label and must not win
        let prediction = select(&[0.1, 0.2, 9.0], &labels(&["a", "b"]));
        assert_eq!(prediction.label(), "b");
    }

    #[test]
    fn test_nan_scores_passed_over() {
        let prediction = select(&[f32::NAN, 0.2, 0.1], &labels(&["a", "b", "c"]));
        assert_eq!(prediction.label(), "b");
    }

    #[test]
    fn test_all_nan_yields_unknown() {
        assert!(select(&[f32::NAN, f32::NAN], &labels(&["a", "b"])).is_unknown());
    }

    #[test]
    fn test_negative_logits() {
        let prediction = select(&[-3.0, -0.5, -2.0], &labels(&["a", "b", "c"]));
        assert_eq!(prediction.label(), "b");
    }

    #[test]
    fn test_unknown_renders_sentinel() {
        assert_eq!(Prediction::Unknown.label(), UNKNOWN_LABEL);
        assert_eq!(Prediction::Unknown.score(), None);
    }
}
