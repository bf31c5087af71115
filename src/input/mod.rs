//! Input sources standing in for the keyboard

mod script;

pub use script::{InputScript, Key, Segment};

/// Input script errors
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Failed to read input script {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Segment {index} ends before it starts")]
    InvertedSegment { index: usize },
}
