// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{stream, StreamExt};
use stumbler_core::{StreamItem, StumblerError};
use stumbler_stream::PairwiseExt;
use stumbler_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, test_channel_with_errors,
    unwrap_stream,
};

#[tokio::test]
async fn test_pairwise_first_value_produces_nothing() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<u32>();
    let mut pairs = source.pairwise();

    // Act
    tx.send(1)?;

    // Assert
    assert_no_element_emitted(&mut pairs, 100).await;

    tx.send(2)?;
    assert_eq!(unwrap_stream(&mut pairs, 500).await.unwrap(), (1, 2));

    Ok(())
}

#[tokio::test]
async fn test_pairwise_n_values_yield_n_minus_one_pairs() -> anyhow::Result<()> {
    // Arrange
    let source = stream::iter(vec![10, 20, 30, 40, 50].into_iter().map(StreamItem::Value));

    // Act
    let pairs: Vec<_> = source.pairwise().map(StreamItem::unwrap).collect().await;

    // Assert
    assert_eq!(pairs, vec![(10, 20), (20, 30), (30, 40), (40, 50)]);

    Ok(())
}

#[tokio::test]
async fn test_pairwise_fewer_than_two_values_yield_nothing() -> anyhow::Result<()> {
    // Arrange
    let empty = stream::iter(Vec::<StreamItem<u32>>::new());
    let single = stream::iter(vec![StreamItem::Value(1_u32)]);

    // Act
    let from_empty: Vec<_> = empty.pairwise().collect().await;
    let from_single: Vec<_> = single.pairwise().collect().await;

    // Assert
    assert!(from_empty.is_empty());
    assert!(from_single.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_pairwise_forwards_error_and_terminates() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel_with_errors::<u32>();
    let mut pairs = source.pairwise();

    // Act
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Value(2))?;
    tx.send(StreamItem::Error(StumblerError::stream_error("provider disabled")))?;
    tx.send(StreamItem::Value(3))?;

    // Assert
    assert_eq!(unwrap_stream(&mut pairs, 500).await.unwrap(), (1, 2));
    assert!(unwrap_stream(&mut pairs, 500).await.is_error());
    assert_stream_ended(&mut pairs, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_pairwise_ends_with_source() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<u32>();
    let mut pairs = source.pairwise();

    // Act
    tx.send(1)?;
    drop(tx);

    // Assert
    assert_stream_ended(&mut pairs, 500).await;

    Ok(())
}
