//! Error types for protocol operations
//!
//! Provides error types for decoding API responses and encoding request bodies.

use thiserror::Error;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while mapping between wire JSON and typed records
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The body was not well-formed JSON, or a required field was missing or mistyped
    #[error("Failed to decode {target}: {source}")]
    Decode {
        /// Name of the record that was being decoded
        target: &'static str,
        /// Underlying serde error (carries field name, line and column)
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be serialized
    #[error("Failed to encode {target}: {source}")]
    Encode {
        /// Name of the record that was being encoded
        target: &'static str,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

impl ProtocolError {
    /// Wrap a serde error raised while decoding `target`.
    pub fn decode(target: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { target, source }
    }

    /// Wrap a serde error raised while encoding `target`.
    pub fn encode(target: &'static str, source: serde_json::Error) -> Self {
        Self::Encode { target, source }
    }

    /// True when the input was not syntactically valid JSON.
    pub fn is_syntax(&self) -> bool {
        match self {
            Self::Decode { source, .. } => source.is_syntax() || source.is_eof(),
            Self::Encode { .. } => false,
        }
    }
}
