mod classifier;
mod engine;
mod error;
mod features;
mod normalize;
mod select;
mod vocab;
pub mod builder;

pub use builder::ClassifierBuilder;
pub use classifier::Classifier;
pub use engine::{InferenceEngine, OnnxEngine};
pub use error::ClassifierError;
pub use features::{vectorize, FEATURE_DIM};
pub use normalize::normalize;
pub use select::{select, Prediction, UNKNOWN_LABEL};
pub use vocab::{load_labels, load_vocabulary, LabelTable, Vocabulary};

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file, if the engine was loaded from one
    pub model_path: Option<String>,
    /// Length of the feature vector fed to the model
    pub feature_dim: usize,
    /// Number of tokens the vocabulary maps to feature indices
    pub vocab_size: usize,
    /// Number of classes the model scores
    pub num_labels: usize,
    /// Class names, in model output order
    pub labels: Vec<String>,
}
