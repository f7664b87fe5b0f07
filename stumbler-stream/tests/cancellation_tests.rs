// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use stumbler_stream::{CombineAnyExt, CombineWithLatestFromExt, LatestSlots, PairwiseExt};
use stumbler_test_utils::{test_channel, unwrap_stream};

#[tokio::test]
async fn test_dropping_combine_any_output_drops_every_input() -> anyhow::Result<()> {
    // Arrange
    let (wifi_tx, wifi) = test_channel::<u32>();
    let (cell_tx, cell) = test_channel::<u32>();
    let mut combined = vec![wifi, cell].combine_any(LatestSlots::into_vec);

    wifi_tx.send(1)?;
    assert_eq!(
        unwrap_stream(&mut combined, 500).await.unwrap(),
        vec![Some(1), None]
    );

    // Act
    drop(combined);

    // Assert
    assert!(wifi_tx.is_closed());
    assert!(cell_tx.is_closed());

    Ok(())
}

#[tokio::test]
async fn test_dropping_combine_with_latest_from_output_drops_both_inputs() -> anyhow::Result<()> {
    // Arrange
    let (position_tx, positions) = test_channel::<u32>();
    let (pressure_tx, pressures) = test_channel::<u32>();
    let mut tagged = positions.combine_with_latest_from(pressures, |a, b| (a, b));

    pressure_tx.send(1013)?;
    position_tx.send(1)?;
    assert_eq!(
        unwrap_stream(&mut tagged, 500).await.unwrap(),
        (1, Some(1013))
    );

    // Act
    drop(tagged);

    // Assert
    assert!(position_tx.is_closed());
    assert!(pressure_tx.is_closed());

    Ok(())
}

#[tokio::test]
async fn test_dropping_pairwise_output_drops_input() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<u32>();
    let mut pairs = source.pairwise();

    tx.send(1)?;
    tx.send(2)?;
    assert_eq!(unwrap_stream(&mut pairs, 500).await.unwrap(), (1, 2));

    // Act
    drop(pairs);

    // Assert
    assert!(tx.is_closed());

    Ok(())
}
