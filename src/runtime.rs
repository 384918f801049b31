use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::Result as OrtResult;
use std::sync::Once;

static INIT: Once = Once::new();

/// Graph optimization applied when a session is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptLevel {
    Disable,
    Basic,
    Extended,
    #[default]
    Full,
}

impl OptLevel {
    fn to_ort(self) -> GraphOptimizationLevel {
        match self {
            OptLevel::Disable => GraphOptimizationLevel::Disable,
            OptLevel::Basic => GraphOptimizationLevel::Level1,
            OptLevel::Extended => GraphOptimizationLevel::Level2,
            OptLevel::Full => GraphOptimizationLevel::Level3,
        }
    }
}

/// Settings for ONNX Runtime session creation. Thread counts of zero let
/// the runtime decide.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeConfig {
    pub inter_threads: usize,
    pub intra_threads: usize,
    pub optimization: OptLevel,
}

fn init_onnx_environment() -> OrtResult<()> {
    ort::init().with_name("scantag").commit()?;
    Ok(())
}

/// Initializes the process-wide ONNX Runtime environment exactly once.
pub fn ensure_initialized() -> OrtResult<()> {
    INIT.call_once(|| {
        init_onnx_environment().expect("Failed to initialize ONNX Runtime environment");
    });
    Ok(())
}

pub fn create_session_builder(config: &RuntimeConfig) -> OrtResult<SessionBuilder> {
    ensure_initialized()?;
    let mut builder = Session::builder()?;

    if config.inter_threads > 0 {
        builder = builder.with_inter_threads(config.inter_threads)?;
    }
    if config.intra_threads > 0 {
        builder = builder.with_intra_threads(config.intra_threads)?;
    }

    builder = builder.with_optimization_level(config.optimization.to_ort())?;

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_initialization() {
        assert!(ensure_initialized().is_ok());
        assert!(ensure_initialized().is_ok()); // Second call should be fine
    }

    #[test]
    fn test_session_builder_config() {
        let config = RuntimeConfig {
            inter_threads: 2,
            intra_threads: 2,
            optimization: OptLevel::Basic,
        };
        let builder = create_session_builder(&config);
        assert!(builder.is_ok());
    }
}
