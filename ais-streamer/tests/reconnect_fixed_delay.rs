/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod support;

use ais_streamer::{ConnectionState, StreamEvent, RECONNECT_DELAY};
use std::sync::Arc;
use support::{make_connector, RecordingPublisher, Script, ScriptedTransport, API_KEY};

#[tokio::test(start_paused = true)]
async fn reconnects_after_fixed_delay_across_repeated_drops() {
    let _ = tracing_subscriber::fmt::try_init();

    let (transport, mut attempts) = ScriptedTransport::new(Vec::new());
    let (publisher, _published) = RecordingPublisher::new();
    let connector = Arc::new(make_connector(transport.clone(), publisher, None));

    let runner = connector.clone();
    let handle = tokio::spawn(async move { runner.run().await });

    let mut started = Vec::new();
    for _ in 0..4 {
        started.push(attempts.recv().await.expect("connector keeps reconnecting"));
    }
    handle.abort();

    for pair in started.windows(2) {
        assert_eq!(pair[1] - pair[0], RECONNECT_DELAY);
    }

    let sent = transport.sent();
    assert!(sent.len() >= 3);
    for request in &sent {
        let value: serde_json::Value = serde_json::from_str(request).unwrap();
        assert_eq!(value["APIkey"], API_KEY);
        assert_eq!(
            value["BoundingBoxes"],
            serde_json::json!([[[-90.0, -180.0], [90.0, 180.0]]])
        );
    }
}

#[tokio::test(start_paused = true)]
async fn failed_open_is_retried_with_the_same_delay() {
    let (transport, mut attempts) =
        ScriptedTransport::new(vec![Script::Refuse, Script::Refuse, Script::Refuse]);
    let (publisher, _published) = RecordingPublisher::new();
    let connector = Arc::new(make_connector(transport.clone(), publisher, None));

    let runner = connector.clone();
    let handle = tokio::spawn(async move { runner.run().await });

    let mut started = Vec::new();
    for _ in 0..4 {
        started.push(attempts.recv().await.expect("connector keeps reconnecting"));
    }
    handle.abort();

    for pair in started.windows(2) {
        assert_eq!(pair[1] - pair[0], RECONNECT_DELAY);
    }
    // Only the fourth attempt opened a session.
    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn error_event_is_treated_like_close() {
    let (transport, mut attempts) = ScriptedTransport::new(vec![
        Script::Session(vec![StreamEvent::Error("connection reset".to_string())]),
        Script::HoldOpen(Vec::new()),
    ]);
    let (publisher, _published) = RecordingPublisher::new();
    let connector = Arc::new(make_connector(transport.clone(), publisher, None));
    let mut state = connector.subscribe_state();

    let runner = connector.clone();
    let handle = tokio::spawn(async move { runner.run().await });

    let first = attempts.recv().await.unwrap();
    let second = attempts.recv().await.unwrap();
    assert_eq!(second - first, RECONNECT_DELAY);

    state
        .wait_for(|state| *state == ConnectionState::Connected)
        .await
        .expect("state channel open");
    assert_eq!(connector.state(), ConnectionState::Connected);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn no_attempt_before_the_delay_elapses() {
    let (transport, mut attempts) = ScriptedTransport::new(Vec::new());
    let (publisher, _published) = RecordingPublisher::new();
    let connector = Arc::new(make_connector(transport, publisher, None));

    let runner = connector.clone();
    let handle = tokio::spawn(async move { runner.run().await });

    attempts.recv().await.unwrap();
    tokio::time::sleep(RECONNECT_DELAY - std::time::Duration::from_millis(1)).await;
    assert!(attempts.try_recv().is_err());
    assert_eq!(connector.state(), ConnectionState::Disconnected);

    tokio::time::sleep(std::time::Duration::from_millis(1)).await;
    tokio::task::yield_now().await;
    assert!(attempts.try_recv().is_ok());

    handle.abort();
}
