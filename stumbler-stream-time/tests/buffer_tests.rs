// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use stumbler_core::{StreamItem, StumblerError};
use stumbler_runtime::TokioTimer;
use stumbler_stream_time::{BufferExt, BufferWithDefaultTimerExt};
use stumbler_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, test_channel_with_errors,
    unwrap_stream,
};
use tokio::time::{advance, Instant};

const WINDOW: Duration = Duration::from_millis(1_000);

fn assert_elapsed(start: Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(1),
        "expected {expected:?} to have elapsed, got {elapsed:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn test_buffer_emits_items_collected_during_window() -> anyhow::Result<()> {
    // Arrange
    let start = Instant::now();
    let (tx, source) = test_channel::<u32>();
    let mut batches = source.buffer_with_timer(WINDOW, TokioTimer);

    // Act
    tx.send(1)?;
    tx.send(2)?;
    tx.send(3)?;

    // Assert
    assert_eq!(
        unwrap_stream(&mut batches, 5_000).await.unwrap(),
        vec![1, 2, 3]
    );
    assert_elapsed(start, WINDOW);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_buffer_does_not_flush_before_window_elapses() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<u32>();
    let mut batches = source.buffer(WINDOW);

    // Act
    tx.send(1)?;

    // Assert
    assert_no_element_emitted(&mut batches, 990).await;
    assert_eq!(unwrap_stream(&mut batches, 20).await.unwrap(), vec![1]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_buffer_emits_empty_batches_on_quiet_windows() -> anyhow::Result<()> {
    // Arrange
    let start = Instant::now();
    let (_tx, source) = test_channel::<u32>();
    let mut batches = source.buffer(WINDOW);

    // Act & Assert
    assert_eq!(
        unwrap_stream(&mut batches, 5_000).await.unwrap(),
        Vec::<u32>::new()
    );
    assert_elapsed(start, WINDOW);

    assert_eq!(
        unwrap_stream(&mut batches, 5_000).await.unwrap(),
        Vec::<u32>::new()
    );
    assert_elapsed(start, WINDOW * 2);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_buffer_starts_over_after_each_tick() -> anyhow::Result<()> {
    // Arrange
    let start = Instant::now();
    let (tx, source) = test_channel::<&'static str>();
    let mut batches = source.buffer(WINDOW);

    // Act & Assert
    tx.send("wifi")?;
    assert_eq!(unwrap_stream(&mut batches, 5_000).await.unwrap(), vec!["wifi"]);

    advance(Duration::from_millis(300)).await;
    tx.send("cell")?;
    tx.send("bluetooth")?;
    assert_eq!(
        unwrap_stream(&mut batches, 5_000).await.unwrap(),
        vec!["cell", "bluetooth"]
    );
    assert_elapsed(start, WINDOW * 2);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_buffer_final_flush_after_source_completes() -> anyhow::Result<()> {
    // Arrange
    let start = Instant::now();
    let (tx, source) = test_channel::<u32>();
    let mut batches = source.buffer(WINDOW);

    // Act
    tx.send(7)?;
    drop(tx);

    // Assert
    assert_eq!(unwrap_stream(&mut batches, 5_000).await.unwrap(), vec![7]);
    assert_elapsed(start, WINDOW);
    assert_stream_ended(&mut batches, 5_000).await;

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_buffer_empty_source_yields_exactly_one_empty_batch() -> anyhow::Result<()> {
    // Arrange
    let start = Instant::now();
    let (tx, source) = test_channel::<u32>();
    let mut batches = source.buffer(WINDOW);

    // Act
    drop(tx);

    // Assert
    assert_eq!(
        unwrap_stream(&mut batches, 5_000).await.unwrap(),
        Vec::<u32>::new()
    );
    assert_elapsed(start, WINDOW);
    assert_stream_ended(&mut batches, 5_000).await;

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_buffer_rejects_zero_window() -> anyhow::Result<()> {
    // Arrange
    let (_tx, source) = test_channel::<u32>();
    let mut batches = source.buffer(Duration::ZERO);

    // Act
    let item = unwrap_stream(&mut batches, 100).await;

    // Assert
    assert!(matches!(
        item,
        StreamItem::Error(StumblerError::InvalidArgument { .. })
    ));
    assert_stream_ended(&mut batches, 100).await;

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_buffer_error_discards_collected_items_and_terminates() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel_with_errors::<u32>();
    let mut batches = source.buffer(WINDOW);

    // Act
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Value(2))?;
    tx.send(StreamItem::Error(StumblerError::stream_error("scan failed")))?;

    // Assert
    let StreamItem::Error(error) = unwrap_stream(&mut batches, 100).await else {
        panic!("expected an error item, got a value");
    };
    assert_eq!(error.to_string(), "Stream processing error: scan failed");
    assert_stream_ended(&mut batches, 5_000).await;

    Ok(())
}
