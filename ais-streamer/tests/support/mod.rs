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

use ais_streamer::{
    default_bounding_boxes, BridgeError, BrokerPublisher, Envelope, StreamConnector, StreamEvent,
    StreamSession, StreamSettings, StreamTransport, SubscriptionRequest, TopicRouter,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;

pub(crate) const STREAM_URL: &str = "wss://stream.invalid/v0/stream";
pub(crate) const BASE_PATH: &str = "producers/aisstream/data";
pub(crate) const API_KEY: &str = "test-api-key";

/// Behaviour of one connection attempt.
#[allow(dead_code)]
pub(crate) enum Script {
    Refuse,
    /// Delivers the events in order, then closes.
    Session(Vec<StreamEvent>),
    /// Delivers the events in order, then stays open until dropped.
    HoldOpen(Vec<StreamEvent>),
}

/// Stream transport driven by a queue of scripts. Once the queue is empty every
/// attempt yields a session that closes immediately.
pub(crate) struct ScriptedTransport {
    scripts: Mutex<VecDeque<Script>>,
    attempts: UnboundedSender<Instant>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    pub(crate) fn new(scripts: Vec<Script>) -> (Arc<Self>, UnboundedReceiver<Instant>) {
        let (attempts, attempts_rx) = unbounded_channel();
        let transport = Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            attempts,
            sent: Arc::new(Mutex::new(Vec::new())),
        });
        (transport, attempts_rx)
    }

    #[allow(dead_code)]
    pub(crate) fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl StreamTransport for ScriptedTransport {
    async fn connect(&self, url: &str) -> Result<Box<dyn StreamSession>, BridgeError> {
        let _ = self.attempts.send(Instant::now());
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Script::Session(Vec::new()));

        let (events, hold_open) = match script {
            Script::Refuse => {
                return Err(BridgeError::StreamConnect {
                    url: url.to_string(),
                    reason: "connection refused".to_string(),
                })
            }
            Script::Session(events) => (events, false),
            Script::HoldOpen(events) => (events, true),
        };

        Ok(Box::new(ScriptedSession {
            events: events.into(),
            hold_open,
            sent: self.sent.clone(),
        }))
    }
}

struct ScriptedSession {
    events: VecDeque<StreamEvent>,
    hold_open: bool,
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl StreamSession for ScriptedSession {
    async fn send_text(&mut self, text: String) -> Result<(), BridgeError> {
        self.sent.lock().unwrap().push(text);
        Ok(())
    }

    async fn next_event(&mut self) -> StreamEvent {
        match self.events.pop_front() {
            Some(event) => event,
            None if self.hold_open => std::future::pending().await,
            None => StreamEvent::Closed,
        }
    }
}

/// Publisher that records every call and streams publishes to the test.
pub(crate) struct RecordingPublisher {
    fail_connect: bool,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    published: Mutex<Vec<(String, Envelope)>>,
    notify: UnboundedSender<(String, Envelope)>,
}

impl RecordingPublisher {
    pub(crate) fn new() -> (Arc<Self>, UnboundedReceiver<(String, Envelope)>) {
        Self::build(false)
    }

    #[allow(dead_code)]
    pub(crate) fn refusing() -> (Arc<Self>, UnboundedReceiver<(String, Envelope)>) {
        Self::build(true)
    }

    fn build(fail_connect: bool) -> (Arc<Self>, UnboundedReceiver<(String, Envelope)>) {
        let (notify, notify_rx) = unbounded_channel();
        let publisher = Arc::new(Self {
            fail_connect,
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            published: Mutex::new(Vec::new()),
            notify,
        });
        (publisher, notify_rx)
    }

    #[allow(dead_code)]
    pub(crate) fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub(crate) fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub(crate) fn published(&self) -> Vec<(String, Envelope)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrokerPublisher for RecordingPublisher {
    async fn connect(&self) -> Result<(), BridgeError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect {
            return Err(BridgeError::BrokerConnect("connection refused".to_string()));
        }
        Ok(())
    }

    async fn publish(&self, topic: &str, envelope: &Envelope) -> Result<(), BridgeError> {
        // Round-trip through the wire encoding so tests see what a broker would.
        let bytes = envelope.to_json_bytes()?;
        let decoded: Envelope = serde_json::from_slice(&bytes)?;
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), decoded.clone()));
        let _ = self.notify.send((topic.to_string(), decoded));
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), BridgeError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub(crate) fn make_connector(
    transport: Arc<ScriptedTransport>,
    publisher: Arc<RecordingPublisher>,
    group_id: Option<&str>,
) -> StreamConnector {
    StreamConnector::new(
        StreamSettings::new(
            STREAM_URL,
            SubscriptionRequest::new(API_KEY, default_bounding_boxes()),
        ),
        transport,
        publisher,
        TopicRouter::new(BASE_PATH, group_id.map(str::to_string)),
    )
}

#[allow(dead_code)]
pub(crate) fn position_report(mmsi: u64, longitude: f64, latitude: f64) -> String {
    serde_json::json!({
        "MessageType": "PositionReport",
        "Message": {"PositionReport": {
            "Longitude": longitude,
            "Latitude": latitude,
            "Sog": 11.3,
            "TrueHeading": 270
        }},
        "MetaData": {"MMSI": mmsi, "ShipName": "TEST VESSEL   ", "time_utc": "2024-05-01 12:00:00"}
    })
    .to_string()
}

#[allow(dead_code)]
pub(crate) fn static_data(mmsi: u64) -> String {
    serde_json::json!({
        "MessageType": "ShipStaticData",
        "Message": {"ShipStaticData": {
            "MessageID": 5,
            "RepeatIndicator": 0,
            "Spare": false,
            "UserID": mmsi,
            "Valid": true,
            "Name": "TEST VESSEL",
            "Destination": "ROTTERDAM"
        }},
        "MetaData": {"MMSI": mmsi}
    })
    .to_string()
}
