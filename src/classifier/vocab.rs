use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::ClassifierError;

/// On-disk shape of the vocabulary artifact.
///
/// Both fields default to empty so a partially populated artifact still
/// parses; a missing `vocab` field degrades to the empty mapping rather
/// than failing startup.
#[derive(Debug, Deserialize)]
struct VocabArtifact {
    #[serde(default)]
    vocab: HashMap<String, usize>,
    #[serde(default)]
    idf: Vec<f32>,
}

/// Token-to-feature-index mapping, immutable after load.
///
/// Carries the per-term document-frequency weights that ship in the same
/// artifact. The classification path consumes raw counts and never applies
/// these weights; they are retained so the artifact round-trips intact.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl Vocabulary {
    /// The empty vocabulary: every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(index: HashMap<String, usize>) -> Self {
        Self { index, idf: Vec::new() }
    }

    /// Parses the vocabulary artifact, falling back to the empty mapping
    /// when the document cannot be parsed at all.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<VocabArtifact>(json) {
            Ok(artifact) => {
                if artifact.vocab.is_empty() {
                    warn!("Vocabulary artifact has no usable \"vocab\" entries");
                }
                Self {
                    index: artifact.vocab,
                    idf: artifact.idf,
                }
            }
            Err(e) => {
                warn!("Malformed vocabulary artifact ({}), continuing with empty vocabulary", e);
                Self::empty()
            }
        }
    }

    pub fn lookup(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Document-frequency weights loaded alongside the mapping. Unused by
    /// the pipeline; see `idf` in the artifact schema.
    pub fn idf_weights(&self) -> &[f32] {
        &self.idf
    }

    /// Number of entries whose index can never land inside a feature
    /// vector of the given length. Such entries are ignored at vectorize
    /// time; this exists so callers can log the mismatch once at startup.
    pub fn entries_out_of_range(&self, dim: usize) -> usize {
        self.index.values().filter(|&&i| i >= dim).count()
    }
}

/// Ordered class names; index i corresponds to the model's i-th output.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Parses the label artifact. Malformed label data is fatal since
    /// indexed lookups against a half-loaded table would be unsafe.
    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let labels: Vec<String> = serde_json::from_str(json)
            .map_err(|e| ClassifierError::BuildError(format!("Malformed label artifact: {}", e)))?;
        Ok(Self { labels })
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

/// Reads the vocabulary artifact from disk. An unreadable file degrades to
/// the empty vocabulary, matching the parse fallback.
pub fn load_vocabulary<P: AsRef<Path>>(path: P) -> Vocabulary {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(json) => {
            let vocab = Vocabulary::from_json(&json);
            info!("Loaded vocabulary from {:?} ({} tokens)", path, vocab.len());
            vocab
        }
        Err(e) => {
            warn!("Failed to read vocabulary artifact {:?} ({}), continuing with empty vocabulary", path, e);
            Vocabulary::empty()
        }
    }
}

/// Reads the label artifact from disk. Any failure here is fatal to the
/// build.
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<LabelTable, ClassifierError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .map_err(|e| ClassifierError::BuildError(format!("Failed to read label artifact {:?}: {}", path, e)))?;
    let labels = LabelTable::from_json(&json)?;
    info!("Loaded {} labels from {:?}", labels.len(), path);
    Ok(labels)
}
