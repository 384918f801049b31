use log::{info, warn};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Artifact file names inside a bundle directory.
pub const MODEL_FILE: &str = "classifier.onnx";
pub const VOCAB_FILE: &str = "vocab.json";
pub const LABELS_FILE: &str = "labels.json";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Missing artifact: {0}")]
    Missing(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Malformed manifest: {0}")]
    ManifestError(String),
    #[error("Hash mismatch: expected {expected}, got {actual} for {name}")]
    HashMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// Digest index shipped next to the artifacts. Entries map artifact file
/// names to lowercase SHA-256 hex digests; files without an entry are not
/// verified.
#[derive(Debug, Deserialize)]
struct BundleManifest {
    #[serde(default)]
    artifacts: HashMap<String, String>,
}

/// Locates the artifact bundle the classifier loads from: the model file,
/// the vocabulary artifact, and the label artifact, shipped together in
/// one directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    bundle_dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store over the default bundle directory.
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::default_bundle_dir())
    }

    /// Returns the default bundle directory path
    pub fn default_bundle_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("SCANTAG_BUNDLE") {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("scantag").join("bundle");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".local").join("share").join("scantag").join("bundle");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("scantag").join("bundle")
    }

    pub fn new<P: AsRef<Path>>(bundle_dir: P) -> io::Result<Self> {
        let bundle_dir = bundle_dir.as_ref().to_path_buf();
        fs::create_dir_all(&bundle_dir)?;
        Ok(Self { bundle_dir })
    }

    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    pub fn model_path(&self) -> PathBuf {
        self.bundle_dir.join(MODEL_FILE)
    }

    pub fn vocab_path(&self) -> PathBuf {
        self.bundle_dir.join(VOCAB_FILE)
    }

    pub fn labels_path(&self) -> PathBuf {
        self.bundle_dir.join(LABELS_FILE)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.bundle_dir.join(MANIFEST_FILE)
    }

    /// Whether the artifacts the classifier cannot start without are
    /// present. The vocabulary artifact is not required: a missing
    /// vocabulary degrades classification instead of blocking startup.
    pub fn is_bundle_present(&self) -> bool {
        let model = self.model_path();
        let labels = self.labels_path();
        info!("Checking bundle at {:?}:", self.bundle_dir);
        info!("  Model: {:?} (exists: {})", model, model.exists());
        info!("  Labels: {:?} (exists: {})", labels, labels.exists());
        model.exists() && labels.exists()
    }

    /// Errors with the first missing required artifact.
    pub fn require_bundle(&self) -> Result<(), ArtifactError> {
        if !self.model_path().exists() {
            return Err(ArtifactError::Missing(
                self.model_path().to_string_lossy().to_string(),
            ));
        }
        if !self.labels_path().exists() {
            return Err(ArtifactError::Missing(
                self.labels_path().to_string_lossy().to_string(),
            ));
        }
        if !self.vocab_path().exists() {
            warn!(
                "Vocabulary artifact {:?} is missing; classification will degrade to zero vectors",
                self.vocab_path()
            );
        }
        Ok(())
    }

    fn file_digest(&self, path: &Path) -> Result<String, ArtifactError> {
        let bytes = fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }

    fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, ArtifactError> {
        let hash = self.file_digest(path)?;
        info!("Verifying {:?}", path);
        info!("  Calculated hash: {}", hash);
        info!("  Expected hash:   {}", expected_hash);
        Ok(hash == expected_hash)
    }

    /// Verifies bundle files against the manifest's digests.
    ///
    /// Returns `Ok(true)` when every listed artifact matches, `Ok(false)`
    /// on the first mismatch or listed-but-missing file. A bundle without
    /// a manifest has nothing to verify and passes.
    pub fn verify_bundle(&self) -> Result<bool, ArtifactError> {
        let manifest_path = self.manifest_path();
        if !manifest_path.exists() {
            info!("No manifest at {:?}, skipping verification", manifest_path);
            return Ok(true);
        }

        let json = fs::read_to_string(&manifest_path)?;
        let manifest: BundleManifest = serde_json::from_str(&json)
            .map_err(|e| ArtifactError::ManifestError(e.to_string()))?;

        for (name, expected) in &manifest.artifacts {
            let path = self.bundle_dir.join(name);
            if !path.exists() {
                warn!("Manifest lists {:?} but the file is missing", path);
                return Ok(false);
            }
            if !self.verify_file(&path, expected)? {
                warn!("Hash mismatch for {:?}", path);
                return Ok(false);
            }
        }

        info!("Bundle verified against manifest ({} artifacts)", manifest.artifacts.len());
        Ok(true)
    }
}
