// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io;
use stumbler_core::StumblerError;

#[test]
fn test_error_display() {
    let err = StumblerError::stream_error("location provider failed");
    assert_eq!(
        err.to_string(),
        "Stream processing error: location provider failed"
    );

    let err = StumblerError::invalid_argument("window must be positive");
    assert_eq!(err.to_string(), "Invalid argument: window must be positive");
}

#[test]
fn test_user_error_keeps_source() {
    let err = StumblerError::user_error(io::Error::other("sensor offline"));

    assert_eq!(err.to_string(), "User error: sensor offline");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_clone_degrades_user_error_to_message() {
    let err = StumblerError::user_error(io::Error::other("gps lost"));
    let cloned = err.clone();

    assert!(matches!(cloned, StumblerError::StreamProcessingError { .. }));
    assert!(cloned.to_string().contains("gps lost"));
}

#[test]
fn test_clone_keeps_context() {
    let err = StumblerError::invalid_argument("zero window");

    assert!(matches!(
        err.clone(),
        StumblerError::InvalidArgument { context } if context == "zero window"
    ));
}
