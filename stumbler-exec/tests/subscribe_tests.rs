// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::lock::Mutex as FutureMutex;
use futures::stream;
use std::sync::{Arc, Mutex as StdMutex};
use stumbler_core::{CancellationToken, StreamItem, StumblerError};
use stumbler_exec::SubscribeExt;
use stumbler_test_utils::{recv_timeout, test_channel, test_channel_with_errors};
use tokio::spawn;
use tokio::sync::mpsc::unbounded_channel;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Report rejected: {0}")]
struct ReportRejected(u32);

#[tokio::test]
async fn test_subscribe_processes_values_in_order() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<u32>();
    let handled = Arc::new(FutureMutex::new(Vec::new()));
    let (done_tx, mut done_rx) = unbounded_channel();

    let on_next = {
        let handled = handled.clone();
        move |report: u32, _token: CancellationToken| {
            let handled = handled.clone();
            let done_tx = done_tx.clone();
            async move {
                handled.lock().await.push(report);
                let _ = done_tx.send(());
                Ok::<(), ReportRejected>(())
            }
        }
    };

    let subscription = spawn(source.subscribe(
        on_next,
        |err: ReportRejected| panic!("unexpected error: {err}"),
        None,
    ));

    // Act
    for report in 1..=3 {
        tx.send(report)?;
        recv_timeout(&mut done_rx, 1_000)
            .await
            .expect("report handled");
    }
    drop(tx);

    // Assert
    subscription.await??;
    assert_eq!(*handled.lock().await, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn test_subscribe_handler_errors_go_to_callback_and_processing_continues(
) -> anyhow::Result<()> {
    // Arrange
    let source = stream::iter((1..=4).map(StreamItem::Value));
    let handled = Arc::new(StdMutex::new(Vec::new()));
    let rejected = Arc::new(StdMutex::new(Vec::new()));

    let on_next = {
        let handled = handled.clone();
        move |report: u32, _token: CancellationToken| {
            let handled = handled.clone();
            async move {
                if report % 2 == 0 {
                    return Err(ReportRejected(report));
                }
                handled.lock().unwrap().push(report);
                Ok(())
            }
        }
    };

    let on_error = {
        let rejected = rejected.clone();
        move |err: ReportRejected| rejected.lock().unwrap().push(err)
    };

    // Act
    source.subscribe(on_next, on_error, None).await?;

    // Assert
    assert_eq!(*handled.lock().unwrap(), vec![1, 3]);
    assert_eq!(
        *rejected.lock().unwrap(),
        vec![ReportRejected(2), ReportRejected(4)]
    );

    Ok(())
}

#[tokio::test]
async fn test_subscribe_returns_stream_error() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel_with_errors::<u32>();
    let handled = Arc::new(StdMutex::new(Vec::new()));

    let on_next = {
        let handled = handled.clone();
        move |report: u32, _token: CancellationToken| {
            let handled = handled.clone();
            async move {
                handled.lock().unwrap().push(report);
                Ok::<(), ReportRejected>(())
            }
        }
    };

    // Act
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(StumblerError::stream_error("database closed")))?;
    tx.send(StreamItem::Value(2))?;
    let result = source.subscribe(on_next, |_: ReportRejected| {}, None).await;

    // Assert
    assert_eq!(
        result.map_err(|e| e.to_string()),
        Err("Stream processing error: database closed".to_string())
    );
    assert_eq!(*handled.lock().unwrap(), vec![1]);

    Ok(())
}

#[tokio::test]
async fn test_subscribe_stops_when_token_cancelled_while_idle() -> anyhow::Result<()> {
    // Arrange
    let (_tx, source) = test_channel::<u32>();
    let token = CancellationToken::new();

    let subscription = spawn(source.subscribe(
        |_report: u32, _token| async { Ok::<(), ReportRejected>(()) },
        |_: ReportRejected| {},
        Some(token.clone()),
    ));

    // Act
    token.cancel();

    // Assert
    subscription.await??;

    Ok(())
}

#[tokio::test]
async fn test_subscribe_handler_receives_cancellation_token() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<u32>();
    let token = CancellationToken::new();
    let (seen_tx, mut seen_rx) = unbounded_channel();

    let on_next = {
        let token = token.clone();
        move |_report: u32, handler_token: CancellationToken| {
            let seen_tx = seen_tx.clone();
            let token = token.clone();
            async move {
                // The handler cancels the whole subscription through its own token
                handler_token.cancel();
                let _ = seen_tx.send(token.is_cancelled());
                Ok::<(), ReportRejected>(())
            }
        }
    };

    let subscription = spawn(source.subscribe(on_next, |_: ReportRejected| {}, Some(token)));

    // Act
    tx.send(1)?;

    // Assert
    assert_eq!(recv_timeout(&mut seen_rx, 1_000).await, Some(true));
    subscription.await??;

    Ok(())
}
