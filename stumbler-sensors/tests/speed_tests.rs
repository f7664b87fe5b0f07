// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use stumbler_core::{StreamItem, StumblerError};
use stumbler_sensors::{
    PositionObservation, SmoothenedGpsSpeedSource, SmoothingConfig, SpeedSource,
};
use stumbler_test_utils::test_data::{gps_observation, network_observation};
use stumbler_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, test_channel_with_errors,
    unwrap_stream,
};

fn assert_speed(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected speed {expected}, got {actual}"
    );
}

#[tokio::test]
async fn test_speed_smoothed_for_close_fixes() -> anyhow::Result<()> {
    // Arrange
    let (tx, positions) = test_channel::<PositionObservation>();
    let mut speeds = SmoothenedGpsSpeedSource::new(positions).speed_stream();

    // Act
    tx.send(gps_observation(Some(10.0), 0))?;
    tx.send(gps_observation(Some(20.0), 1_000))?;

    // Assert
    assert_speed(unwrap_stream(&mut speeds, 500).await.unwrap(), 18.5);

    Ok(())
}

#[tokio::test]
async fn test_speed_unsmoothed_after_large_gap() -> anyhow::Result<()> {
    // Arrange
    let (tx, positions) = test_channel::<PositionObservation>();
    let mut speeds = SmoothenedGpsSpeedSource::new(positions).speed_stream();

    // Act
    tx.send(gps_observation(Some(10.0), 0))?;
    tx.send(gps_observation(Some(20.0), 10_000))?;

    // Assert
    assert_speed(unwrap_stream(&mut speeds, 500).await.unwrap(), 20.0);

    Ok(())
}

#[tokio::test]
async fn test_speed_gap_of_exactly_max_gap_is_still_smoothed() -> anyhow::Result<()> {
    // Arrange
    let (tx, positions) = test_channel::<PositionObservation>();
    let mut speeds = SmoothenedGpsSpeedSource::new(positions).speed_stream();

    // Act
    tx.send(gps_observation(Some(10.0), 1_000))?;
    tx.send(gps_observation(Some(20.0), 6_000))?;
    tx.send(gps_observation(Some(20.0), 11_001))?;

    // Assert
    assert_speed(unwrap_stream(&mut speeds, 500).await.unwrap(), 18.5);
    assert_speed(unwrap_stream(&mut speeds, 500).await.unwrap(), 20.0);

    Ok(())
}

#[tokio::test]
async fn test_speed_gap_is_absolute() -> anyhow::Result<()> {
    // Arrange
    let (tx, positions) = test_channel::<PositionObservation>();
    let mut speeds = SmoothenedGpsSpeedSource::new(positions).speed_stream();

    // Act
    tx.send(gps_observation(Some(10.0), 20_000))?;
    tx.send(gps_observation(Some(20.0), 1_000))?;

    // Assert
    assert_speed(unwrap_stream(&mut speeds, 500).await.unwrap(), 20.0);

    Ok(())
}

#[tokio::test]
async fn test_speed_zero_when_current_fix_has_no_speed() -> anyhow::Result<()> {
    // Arrange
    let (tx, positions) = test_channel::<PositionObservation>();
    let mut speeds = SmoothenedGpsSpeedSource::new(positions).speed_stream();

    // Act
    tx.send(gps_observation(Some(10.0), 0))?;
    tx.send(network_observation(1_000))?;

    // Assert
    assert_speed(unwrap_stream(&mut speeds, 500).await.unwrap(), 0.0);

    Ok(())
}

#[tokio::test]
async fn test_speed_unsmoothed_when_previous_fix_has_no_speed() -> anyhow::Result<()> {
    // Arrange
    let (tx, positions) = test_channel::<PositionObservation>();
    let mut speeds = SmoothenedGpsSpeedSource::new(positions).speed_stream();

    // Act
    tx.send(gps_observation(None, 0))?;
    tx.send(gps_observation(Some(7.5), 1_000))?;

    // Assert
    assert_speed(unwrap_stream(&mut speeds, 500).await.unwrap(), 7.5);

    Ok(())
}

#[tokio::test]
async fn test_speed_first_fix_alone_emits_nothing() -> anyhow::Result<()> {
    // Arrange
    let (tx, positions) = test_channel::<PositionObservation>();
    let mut speeds = SmoothenedGpsSpeedSource::new(positions).speed_stream();

    // Act
    tx.send(gps_observation(Some(10.0), 0))?;

    // Assert
    assert_no_element_emitted(&mut speeds, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_speed_each_fix_smoothed_against_its_predecessor() -> anyhow::Result<()> {
    // Arrange
    let (tx, positions) = test_channel::<PositionObservation>();
    let mut speeds = SmoothenedGpsSpeedSource::new(positions).speed_stream();

    // Act
    tx.send(gps_observation(Some(10.0), 0))?;
    tx.send(gps_observation(Some(20.0), 1_000))?;
    tx.send(gps_observation(Some(30.0), 2_000))?;
    drop(tx);

    // Assert
    assert_speed(unwrap_stream(&mut speeds, 500).await.unwrap(), 18.5);
    // 20 * 0.15 + 30 * 0.85, raw previous speed rather than the smoothed one
    assert_speed(unwrap_stream(&mut speeds, 500).await.unwrap(), 28.5);
    assert_stream_ended(&mut speeds, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_speed_custom_config() -> anyhow::Result<()> {
    // Arrange
    let (tx, positions) = test_channel::<PositionObservation>();
    let config = SmoothingConfig {
        max_gap: Duration::from_secs(30),
        history_weight: 0.5,
    };
    let mut speeds = SmoothenedGpsSpeedSource::with_config(positions, config).speed_stream();

    // Act
    tx.send(gps_observation(Some(10.0), 0))?;
    tx.send(gps_observation(Some(20.0), 10_000))?;

    // Assert
    assert_speed(unwrap_stream(&mut speeds, 500).await.unwrap(), 15.0);

    Ok(())
}

#[tokio::test]
async fn test_speed_position_error_ends_stream() -> anyhow::Result<()> {
    // Arrange
    let (tx, positions) = test_channel_with_errors::<PositionObservation>();
    let mut speeds = SmoothenedGpsSpeedSource::new(positions).speed_stream();

    // Act
    tx.send(StreamItem::Value(gps_observation(Some(10.0), 0)))?;
    tx.send(StreamItem::Error(StumblerError::stream_error(
        "location provider disabled",
    )))?;

    // Assert
    assert!(unwrap_stream(&mut speeds, 500).await.is_error());
    assert_stream_ended(&mut speeds, 500).await;

    Ok(())
}

#[test]
fn test_default_config_matches_five_second_gap_and_fifteen_percent_history() {
    let config = SmoothingConfig::default();

    assert_eq!(config.max_gap, Duration::from_secs(5));
    assert_speed(config.history_weight, 0.15);
}
