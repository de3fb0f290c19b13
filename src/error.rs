#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("capture surface is not ready")]
    CaptureNotReady,

    #[error("canvas has not been drawn yet")]
    CanvasEmpty,

    #[error("classifier reports {actual} classes but {expected} labels are configured")]
    ClassCountMismatch { expected: usize, actual: usize },

    #[error("classifier returned {actual} probabilities, expected {expected}")]
    PredictionLength { expected: usize, actual: usize },

    #[error("invalid model metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("model metadata lists no labels")]
    MetadataEmpty,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("playback failed for {uri}: {reason}")]
    Playback { uri: String, reason: String },
}
