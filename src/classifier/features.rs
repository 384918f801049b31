use ndarray::Array1;

use super::vocab::Vocabulary;

/// Length of the feature vector the bundled model was trained on.
pub const FEATURE_DIM: usize = 1000;

/// Counts known tokens into a fixed-length bag-of-words vector.
///
/// Each token present in the vocabulary with an index inside the vector
/// increments its slot by 1.0. Unknown tokens and entries whose index
/// falls outside the model's declared input length are skipped silently;
/// that is the load-shedding policy, not an error. Token order never
/// affects the result.
///
/// ```
/// use scantag::{vectorize, Vocabulary};
/// use std::collections::HashMap;
///
/// let vocab = Vocabulary::new(HashMap::from([
///     ("cat".to_string(), 0),
///     ("dog".to_string(), 1),
/// ]));
/// let tokens: Vec<String> = ["cat", "cat", "dog", "fox"]
///     .iter().map(|s| s.to_string()).collect();
/// let features = vectorize(&tokens, &vocab, 4);
/// assert_eq!(features.to_vec(), vec![2.0, 1.0, 0.0, 0.0]);
/// ```
pub fn vectorize(tokens: &[String], vocab: &Vocabulary, dim: usize) -> Array1<f32> {
    let mut features = Array1::zeros(dim);
    for token in tokens {
        if let Some(index) = vocab.lookup(token) {
            if index < dim {
                features[index] += 1.0;
            }
        }
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn small_vocab() -> Vocabulary {
        Vocabulary::new(HashMap::from([
            ("cat".to_string(), 0),
            ("dog".to_string(), 1),
            ("far".to_string(), 9),
        ]))
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_known_tokens() {
        let features = vectorize(&tokens(&["cat", "cat", "dog", "fox"]), &small_vocab(), 4);
        assert_eq!(features.to_vec(), vec![2.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_order_independent() {
        let vocab = small_vocab();
        let a = vectorize(&tokens(&["cat", "dog", "cat"]), &vocab, 4);
        let b = vectorize(&tokens(&["dog", "cat", "cat"]), &vocab, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_index_ignored() {
        // "far" maps to slot 9, outside a 4-wide vector
        let features = vectorize(&tokens(&["far", "cat"]), &small_vocab(), 4);
        assert_eq!(features.to_vec(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_tokens_yield_zero_vector() {
        let features = vectorize(&[], &small_vocab(), 4);
        assert_eq!(features.to_vec(), vec![0.0; 4]);
    }

    #[test]
    fn test_empty_vocabulary_yields_zero_vector() {
        let features = vectorize(&tokens(&["cat", "dog"]), &Vocabulary::empty(), 4);
        assert_eq!(features.to_vec(), vec![0.0; 4]);
    }

    #[test]
    fn test_default_dim_matches_model() {
        let features = vectorize(&tokens(&["cat"]), &small_vocab(), FEATURE_DIM);
        assert_eq!(features.len(), 1000);
    }
}
