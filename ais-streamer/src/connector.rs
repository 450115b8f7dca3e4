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

//! Upstream stream connection and its reconnect loop.
//!
//! The connector cycles `Disconnected -> Connecting -> Connected -> Disconnected`
//! forever. Every drop, including a failed open, is followed by the same fixed
//! [`RECONNECT_DELAY`] before the next attempt. There is no backoff and no retry
//! limit; the feed is expected to be intermittent and the bridge must heal itself.

use crate::error::BridgeError;
use crate::observability::{events, fields};
use crate::publisher::BrokerPublisher;
use crate::subscription::SubscriptionRequest;
use crate::topic::TopicRouter;
use crate::transform::transform;
use crate::upstream::{parse_event, MessageType};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

const COMPONENT: &str = "stream_connector";

pub const RECONNECT_DELAY: Duration = Duration::from_millis(5000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// One inbound occurrence on an open stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamEvent {
    Text(String),
    Closed,
    Error(String),
}

/// An open stream connection.
#[async_trait]
pub trait StreamSession: Send {
    async fn send_text(&mut self, text: String) -> Result<(), BridgeError>;

    /// Waits for the next event. After `Closed` or `Error` the session is spent.
    async fn next_event(&mut self) -> StreamEvent;
}

/// Opens stream sessions; one call per connection attempt.
#[async_trait]
pub trait StreamTransport: Send + Sync {
    async fn connect(&self, url: &str) -> Result<Box<dyn StreamSession>, BridgeError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct StreamSettings {
    pub url: String,
    pub subscription: SubscriptionRequest,
    pub reconnect_delay: Duration,
}

impl StreamSettings {
    pub fn new(url: impl Into<String>, subscription: SubscriptionRequest) -> Self {
        Self {
            url: url.into(),
            subscription,
            reconnect_delay: RECONNECT_DELAY,
        }
    }
}

/// What happened to one inbound payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Published { topic: String },
    Filtered(MessageType),
    Rejected,
    Malformed,
    PublishFailed { topic: String },
}

pub struct StreamConnector {
    settings: StreamSettings,
    transport: Arc<dyn StreamTransport>,
    publisher: Arc<dyn BrokerPublisher>,
    router: TopicRouter,
    state: watch::Sender<ConnectionState>,
}

impl StreamConnector {
    pub fn new(
        settings: StreamSettings,
        transport: Arc<dyn StreamTransport>,
        publisher: Arc<dyn BrokerPublisher>,
        router: TopicRouter,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            settings,
            transport,
            publisher,
            router,
            state,
        }
    }

    pub fn router(&self) -> &TopicRouter {
        &self.router
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Connects, pumps events and reconnects indefinitely. Never returns; stop it by
    /// dropping the future.
    pub async fn run(&self) {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            self.run_session(attempt).await;
            self.set_state(ConnectionState::Disconnected);

            info!(
                event = events::STREAM_RECONNECT_SCHEDULED,
                component = COMPONENT,
                delay_ms = self.settings.reconnect_delay.as_millis() as u64,
                attempt,
                "stream disconnected; reconnect scheduled"
            );
            tokio::time::sleep(self.settings.reconnect_delay).await;
        }
    }

    async fn run_session(&self, attempt: u64) {
        self.set_state(ConnectionState::Connecting);
        let url = self.settings.url.as_str();
        debug!(
            event = events::STREAM_CONNECT_START,
            component = COMPONENT,
            url,
            attempt,
            "opening stream"
        );

        let mut session = match self.transport.connect(url).await {
            Ok(session) => session,
            Err(err) => {
                warn!(
                    event = events::STREAM_CONNECT_FAILED,
                    component = COMPONENT,
                    url,
                    attempt,
                    err = %err,
                    "unable to open stream"
                );
                return;
            }
        };

        self.set_state(ConnectionState::Connected);
        info!(
            event = events::STREAM_CONNECT_OK,
            component = COMPONENT,
            url,
            attempt,
            "stream connected"
        );

        if let Err(err) = self.subscribe(session.as_mut()).await {
            warn!(
                event = events::STREAM_SUBSCRIBE_FAILED,
                component = COMPONENT,
                err = %err,
                "unable to send subscription request"
            );
        } else {
            debug!(
                event = events::STREAM_SUBSCRIBE_OK,
                component = COMPONENT,
                bounding_boxes = self.settings.subscription.bounding_boxes.len(),
                "subscription request sent"
            );
        }

        loop {
            match session.next_event().await {
                StreamEvent::Text(payload) => {
                    self.handle_event(&payload).await;
                }
                StreamEvent::Closed => {
                    info!(
                        event = events::STREAM_CLOSED,
                        component = COMPONENT,
                        url,
                        "stream closed"
                    );
                    return;
                }
                StreamEvent::Error(reason) => {
                    warn!(
                        event = events::STREAM_ERROR,
                        component = COMPONENT,
                        url,
                        err = reason.as_str(),
                        "stream error"
                    );
                    return;
                }
            }
        }
    }

    async fn subscribe(&self, session: &mut dyn StreamSession) -> Result<(), BridgeError> {
        let request = self.settings.subscription.to_json()?;
        session.send_text(request).await
    }

    /// Transforms, filters, routes and publishes a single inbound payload.
    ///
    /// Nothing here changes the connection state; failures are logged and the
    /// next event proceeds as usual.
    pub async fn handle_event(&self, payload: &str) -> EventOutcome {
        let message = match parse_event(payload) {
            Ok(message) => message,
            Err(err) => {
                warn!(
                    event = events::EVENT_MALFORMED,
                    component = COMPONENT,
                    err = %err,
                    payload = fields::payload_preview(payload).as_str(),
                    "dropping malformed payload"
                );
                return EventOutcome::Malformed;
            }
        };

        let Some((category, envelope)) = transform(&message) else {
            debug!(
                event = events::EVENT_REJECTED,
                component = COMPONENT,
                "record without message body or metadata"
            );
            return EventOutcome::Rejected;
        };

        if !category.is_published() {
            debug!(
                event = events::EVENT_FILTERED,
                component = COMPONENT,
                category = category.as_str(),
                known = category.is_known(),
                "category not published"
            );
            return EventOutcome::Filtered(category);
        }

        let topic = self.router.route(&category, envelope.id);
        if let Err(err) = self.publisher.publish(&topic, &envelope).await {
            warn!(
                event = events::EVENT_PUBLISH_FAILED,
                component = COMPONENT,
                topic = topic.as_str(),
                err = %err,
                "publish failed"
            );
            return EventOutcome::PublishFailed { topic };
        }

        let ship_name = message
            .meta_data
            .as_ref()
            .map(|meta| meta.display_name())
            .unwrap_or_default();
        info!(
            event = events::EVENT_PUBLISHED,
            component = COMPONENT,
            category = category.as_str(),
            entity_id = fields::format_entity_id(envelope.id).as_str(),
            ship_name,
            "{} {}",
            fields::format_entity_id(envelope.id),
            ship_name
        );

        EventOutcome::Published { topic }
    }

    fn set_state(&self, state: ConnectionState) {
        self.state.send_replace(state);
    }
}
