// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the stumbler stream combinators.
//!
//! Failures never panic through an operator. They travel in-band as
//! [`StreamItem::Error`](crate::StreamItem::Error) and end the stream that carries them.
//!
//! # Examples
//!
//! ```
//! use stumbler_core::{Result, StumblerError};
//!
//! fn read_fix() -> Result<()> {
//!     Err(StumblerError::stream_error("location provider went away"))
//! }
//!
//! assert!(read_fix().is_err());
//! ```

/// Root error type for all stumbler operations.
#[derive(Debug, thiserror::Error)]
pub enum StumblerError {
    /// A stream failed while being processed.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Error raised by user code (a producer, combiner or handler).
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An operator was configured with an unusable argument.
    #[error("Invalid argument: {context}")]
    InvalidArgument {
        /// Which argument was rejected and why
        context: String,
    },
}

impl StumblerError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create an invalid argument error with the given context
    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }
}

/// Specialized Result type for stumbler operations.
pub type Result<T> = std::result::Result<T, StumblerError>;

impl Clone for StumblerError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // Boxed user errors cannot be cloned; keep their message.
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
            Self::InvalidArgument { context } => Self::InvalidArgument {
                context: context.clone(),
            },
        }
    }
}
