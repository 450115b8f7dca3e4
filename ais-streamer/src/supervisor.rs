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

//! Top-level control loop tying the broker publisher to the stream connector.

use crate::connector::StreamConnector;
use crate::envelope::Envelope;
use crate::error::BridgeError;
use crate::observability::{events, fields};
use crate::publisher::BrokerPublisher;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

const COMPONENT: &str = "supervisor";

pub struct Supervisor {
    publisher: Arc<dyn BrokerPublisher>,
    connector: StreamConnector,
}

impl Supervisor {
    /// `publisher` must be the same handle the connector publishes through.
    pub fn new(publisher: Arc<dyn BrokerPublisher>, connector: StreamConnector) -> Self {
        Self {
            publisher,
            connector,
        }
    }

    /// Runs the bridge until `shutdown` resolves.
    ///
    /// Returns `Err` only when the broker cannot be reached at startup. On shutdown
    /// the stream loop is dropped mid-flight, pending reconnect timers included, and
    /// the broker connection is released exactly once.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<(), BridgeError>
    where
        F: Future<Output = ()>,
    {
        let router = self.connector.router();
        info!(
            event = events::BROKER_CONNECT_START,
            component = COMPONENT,
            base_path = router.base_path(),
            group_id = router.group_id().unwrap_or(fields::NONE),
            "connecting to broker"
        );
        if let Err(err) = self.publisher.connect().await {
            error!(
                event = events::BROKER_CONNECT_FAILED,
                component = COMPONENT,
                err = %err,
                "unable to connect to broker"
            );
            return Err(err);
        }
        info!(
            event = events::BROKER_CONNECT_OK,
            component = COMPONENT,
            "broker connected"
        );

        self.publish_clear().await;

        tokio::select! {
            _ = self.connector.run() => {}
            _ = shutdown => {
                info!(
                    event = events::SUPERVISOR_SHUTDOWN,
                    component = COMPONENT,
                    "termination requested"
                );
            }
        }

        match self.publisher.disconnect().await {
            Ok(()) => info!(
                event = events::BROKER_DISCONNECT_OK,
                component = COMPONENT,
                "broker disconnected"
            ),
            Err(err) => warn!(
                event = events::BROKER_DISCONNECT_FAILED,
                component = COMPONENT,
                err = %err,
                "unable to disconnect from broker"
            ),
        }

        Ok(())
    }

    async fn publish_clear(&self) {
        let topic = self.connector.router().control_topic();
        match self.publisher.publish(&topic, &Envelope::clear()).await {
            Ok(()) => info!(
                event = events::BROKER_CLEAR_SENT,
                component = COMPONENT,
                topic = topic.as_str(),
                "clear signal published"
            ),
            Err(err) => warn!(
                event = events::BROKER_CLEAR_FAILED,
                component = COMPONENT,
                topic = topic.as_str(),
                err = %err,
                "unable to publish clear signal"
            ),
        }
    }
}
