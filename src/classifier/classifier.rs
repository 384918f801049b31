use std::sync::Arc;

use super::engine::InferenceEngine;
use super::error::ClassifierError;
use super::features::vectorize;
use super::normalize::normalize;
use super::select::{select, Prediction};
use super::vocab::{LabelTable, Vocabulary};

/// A thread-safe text classifier over a loaded model, vocabulary, and
/// label table.
///
/// All three resources are read-only after construction and shared via
/// `Arc`, so a `Classifier` can be cloned-by-`Arc` across threads and
/// `predict` called concurrently.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use scantag::{ArtifactStore, Classifier};
/// use std::sync::Arc;
/// use std::thread;
///
/// let store = ArtifactStore::new_default()?;
/// let classifier = Arc::new(Classifier::builder().with_bundle(&store)?.build()?);
///
/// let mut handles = vec![];
/// for _ in 0..3 {
///     let classifier = Arc::clone(&classifier);
///     handles.push(thread::spawn(move || {
///         classifier.predict("scanned receipt text").unwrap();
///     }));
/// }
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Classifier {
    pub model_path: Option<String>,
    pub vocab_path: Option<String>,
    pub labels_path: Option<String>,
    pub(crate) engine: Arc<dyn InferenceEngine>,
    pub(crate) vocabulary: Arc<Vocabulary>,
    pub(crate) labels: Arc<LabelTable>,
    pub(crate) feature_dim: usize,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            model_path: self.model_path.clone(),
            feature_dim: self.feature_dim,
            vocab_size: self.vocabulary.len(),
            num_labels: self.labels.len(),
            labels: self.labels.as_slice().to_vec(),
        }
    }

    /// Classifies a piece of recognized text.
    ///
    /// The text is normalized to lowercase alphanumeric tokens, counted
    /// into a fixed-length feature vector against the vocabulary, scored
    /// by the model, and the arg-max label is returned.
    ///
    /// Empty text, and text whose tokens all miss the vocabulary, is not
    /// an error: it produces the all-zero feature vector and whatever
    /// label the model assigns to it. [`Prediction::Unknown`] is returned
    /// when no class can be named, e.g. with an empty label table. Only
    /// the model call itself can fail.
    pub fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        let tokens = normalize(text);
        let features = vectorize(&tokens, &self.vocabulary, self.feature_dim);
        let scores = self.engine.infer(&features)?;
        Ok(select(&scores, &self.labels))
    }
}
