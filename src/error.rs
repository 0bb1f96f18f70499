#[derive(Debug, thiserror::Error)]
pub enum VisualizerError {
    #[error("yaml parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("export error: {0}")]
    Export(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VisualizerError>;
