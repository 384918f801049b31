use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

use super::classifier::Classifier;
use super::engine::{InferenceEngine, OnnxEngine};
use super::error::ClassifierError;
use super::features::FEATURE_DIM;
use super::vocab::{load_labels, load_vocabulary, LabelTable, Vocabulary};
use crate::artifacts::ArtifactStore;
use crate::runtime::RuntimeConfig;

/// A builder for constructing a Classifier with a fluent interface.
///
/// The usual path loads every artifact from a bundle:
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use scantag::{ArtifactStore, Classifier};
///
/// let store = ArtifactStore::new_default()?;
/// let classifier = Classifier::builder()
///     .with_bundle(&store)?
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// Alternatively, [`with_engine`](Self::with_engine) injects any
/// [`InferenceEngine`] directly, with the vocabulary and label table
/// supplied as values. That is the seam the integration tests use.
#[derive(Debug)]
pub struct ClassifierBuilder {
    model_path: Option<String>,
    vocab_path: Option<String>,
    labels_path: Option<String>,
    engine: Option<Arc<dyn InferenceEngine>>,
    vocabulary: Option<Vocabulary>,
    labels: Option<LabelTable>,
    feature_dim: usize,
    runtime_config: RuntimeConfig,
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierBuilder {
    pub fn new() -> Self {
        Self {
            model_path: None,
            vocab_path: None,
            labels_path: None,
            engine: None,
            vocabulary: None,
            labels: None,
            feature_dim: FEATURE_DIM,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets the runtime configuration for ONNX model execution.
    ///
    /// Takes effect for sessions created by a later
    /// [`with_bundle`](Self::with_bundle) or
    /// [`with_artifacts`](Self::with_artifacts) call.
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Overrides the feature-vector length. Defaults to [`FEATURE_DIM`],
    /// the length the bundled model was trained on.
    pub fn with_feature_dim(mut self, dim: usize) -> Self {
        self.feature_dim = dim;
        self
    }

    /// Loads model, vocabulary, and labels from a bundle directory.
    ///
    /// # Errors
    /// * `BuildError` if a required artifact is missing from the bundle
    /// * everything [`with_artifacts`](Self::with_artifacts) can return
    pub fn with_bundle(self, store: &ArtifactStore) -> Result<Self, ClassifierError> {
        store
            .require_bundle()
            .map_err(|e| ClassifierError::BuildError(e.to_string()))?;
        self.with_artifacts(store.model_path(), store.vocab_path(), store.labels_path())
    }

    /// Loads the three artifacts from explicit paths.
    ///
    /// The label artifact must parse; the vocabulary artifact may be
    /// missing or malformed, in which case the classifier runs with an
    /// empty vocabulary and every input vectorizes to zeros.
    ///
    /// # Errors
    /// * `BuildError` if an engine was already configured
    /// * `BuildError` if the model file is missing or fails to load
    /// * `BuildError` if the label artifact is missing or malformed
    pub fn with_artifacts<P, Q, R>(
        mut self,
        model_path: P,
        vocab_path: Q,
        labels_path: R,
    ) -> Result<Self, ClassifierError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        R: AsRef<Path>,
    {
        if self.engine.is_some() {
            return Err(ClassifierError::BuildError(
                "Inference engine already configured".to_string(),
            ));
        }

        let labels = load_labels(labels_path.as_ref())?;
        let vocabulary = load_vocabulary(vocab_path.as_ref());

        let engine = OnnxEngine::from_file(model_path.as_ref(), &self.runtime_config, labels.len())?;
        info!("Model session created from {:?}", model_path.as_ref());

        self.model_path = Some(model_path.as_ref().to_string_lossy().to_string());
        self.vocab_path = Some(vocab_path.as_ref().to_string_lossy().to_string());
        self.labels_path = Some(labels_path.as_ref().to_string_lossy().to_string());
        self.engine = Some(Arc::new(engine));
        self.vocabulary = Some(vocabulary);
        self.labels = Some(labels);
        Ok(self)
    }

    /// Injects an inference engine directly instead of loading a model
    /// file. Pair with [`with_vocabulary`](Self::with_vocabulary) and
    /// [`with_labels`](Self::with_labels).
    ///
    /// # Errors
    /// * `BuildError` if an engine was already configured
    pub fn with_engine(mut self, engine: Arc<dyn InferenceEngine>) -> Result<Self, ClassifierError> {
        if self.engine.is_some() {
            return Err(ClassifierError::BuildError(
                "Inference engine already configured".to_string(),
            ));
        }
        self.engine = Some(engine);
        Ok(self)
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn with_labels(mut self, labels: LabelTable) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Builds and returns the final Classifier instance.
    ///
    /// # Errors
    /// * `BuildError` if no engine was configured
    /// * `BuildError` if no label table was supplied
    /// * `ValidationError` if the feature dimension is zero
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        if self.feature_dim == 0 {
            return Err(ClassifierError::ValidationError(
                "Feature dimension must be non-zero".to_string(),
            ));
        }

        let engine = self
            .engine
            .ok_or_else(|| ClassifierError::BuildError("No inference engine configured".to_string()))?;
        let labels = self
            .labels
            .ok_or_else(|| ClassifierError::BuildError("No label table loaded".to_string()))?;

        if labels.is_empty() {
            warn!("Label table is empty; every prediction will be Unknown");
        }

        let vocabulary = self.vocabulary.unwrap_or_else(|| {
            warn!("No vocabulary loaded; every input will vectorize to zeros");
            Vocabulary::empty()
        });

        let unreachable = vocabulary.entries_out_of_range(self.feature_dim);
        if unreachable > 0 {
            warn!(
                "{} vocabulary entries map beyond the {}-slot feature vector and will be ignored",
                unreachable, self.feature_dim
            );
        }

        Ok(Classifier {
            model_path: self.model_path,
            vocab_path: self.vocab_path,
            labels_path: self.labels_path,
            engine,
            vocabulary: Arc::new(vocabulary),
            labels: Arc::new(labels),
            feature_dim: self.feature_dim,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct StubEngine {
        scores: Vec<f32>,
    }

    impl InferenceEngine for StubEngine {
        fn infer(&self, _features: &Array1<f32>) -> Result<Vec<f32>, ClassifierError> {
            Ok(self.scores.clone())
        }
    }

    fn stub(scores: Vec<f32>) -> Arc<dyn InferenceEngine> {
        Arc::new(StubEngine { scores })
    }

    #[test]
    fn test_build_requires_engine() {
        let result = ClassifierBuilder::new()
            .with_labels(LabelTable::new(vec!["a".to_string()]))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_requires_labels() {
        let result = ClassifierBuilder::new()
            .with_engine(stub(vec![1.0]))
            .unwrap()
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_engine_cannot_be_set_twice() {
        let result = ClassifierBuilder::new()
            .with_engine(stub(vec![1.0]))
            .unwrap()
            .with_engine(stub(vec![2.0]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_feature_dim_rejected() {
        let result = ClassifierBuilder::new()
            .with_engine(stub(vec![1.0]))
            .unwrap()
            .with_labels(LabelTable::new(vec!["a".to_string()]))
            .with_feature_dim(0)
            .build();
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
    }

    #[test]
    fn test_missing_vocabulary_defaults_to_empty() {
        let classifier = ClassifierBuilder::new()
            .with_engine(stub(vec![0.3, 0.7]))
            .unwrap()
            .with_labels(LabelTable::new(vec!["a".to_string(), "b".to_string()]))
            .build()
            .unwrap();
        assert_eq!(classifier.info().vocab_size, 0);
        assert_eq!(classifier.predict("anything").unwrap().label(), "b");
    }

    #[test]
    fn test_info_reflects_configuration() {
        let classifier = ClassifierBuilder::new()
            .with_engine(stub(vec![1.0, 0.0]))
            .unwrap()
            .with_vocabulary(Vocabulary::new(HashMap::from([("cat".to_string(), 0)])))
            .with_labels(LabelTable::new(vec!["a".to_string(), "b".to_string()]))
            .with_feature_dim(16)
            .build()
            .unwrap();
        let info = classifier.info();
        assert_eq!(info.feature_dim, 16);
        assert_eq!(info.vocab_size, 1);
        assert_eq!(info.num_labels, 2);
        assert_eq!(info.labels, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(info.model_path, None);
    }

    #[test]
    fn test_missing_model_file_is_build_error() {
        let result = ClassifierBuilder::new().with_artifacts(
            "/nonexistent/classifier.onnx",
            "/nonexistent/vocab.json",
            "/nonexistent/labels.json",
        );
        assert!(result.is_err());
    }
}
