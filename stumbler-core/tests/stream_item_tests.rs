// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use stumbler_core::{StreamItem, StumblerError};

#[test]
fn test_value_accessors() {
    let item = StreamItem::Value(42);
    assert!(item.is_value());
    assert!(!item.is_error());
    assert_eq!(item.ok(), Some(42));
}

#[test]
fn test_error_accessors() {
    let item: StreamItem<i32> = StreamItem::Error(StumblerError::stream_error("boom"));
    assert!(item.is_error());
    assert!(item.ok().is_none());
}

#[test]
fn test_map_leaves_errors_untouched() {
    assert_eq!(StreamItem::Value(2).map(|x| x * 10), StreamItem::Value(20));

    let passthrough: StreamItem<i32> =
        StreamItem::<i32>::Error(StumblerError::stream_error("x")).map(|x| x + 1);
    assert!(passthrough.is_error());
}

#[test]
fn test_errors_are_never_equal() {
    let a: StreamItem<i32> = StreamItem::Error(StumblerError::stream_error("same"));
    let b: StreamItem<i32> = StreamItem::Error(StumblerError::stream_error("same"));
    assert_ne!(a, b);
}

#[test]
fn test_result_conversions() {
    let item: StreamItem<&str> = Ok("fix").into();
    assert_eq!(item, StreamItem::Value("fix"));

    let result: Result<&str, StumblerError> = StreamItem::Value("fix").into();
    assert_eq!(result.ok(), Some("fix"));

    let failed: Result<u8, StumblerError> =
        StreamItem::Error(StumblerError::stream_error("boom")).into();
    assert_eq!(
        failed.map_err(|e| e.to_string()),
        Err("Stream processing error: boom".to_string())
    );
}

#[test]
#[should_panic(expected = "called `StreamItem::unwrap()` on an `Error` value")]
fn test_unwrap_panics_on_error() {
    let item: StreamItem<i32> = StreamItem::Error(StumblerError::stream_error("bad"));
    item.unwrap();
}
