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

//! MQTT-backed [`BrokerPublisher`].

use crate::config::BrokerConfig;
use ais_streamer::{BridgeError, BrokerPublisher, Envelope};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rumqttc::{
    AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS,
    Transport,
};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

const COMPONENT: &str = "mqtt_publisher";
const CLIENT_ID_PREFIX: &str = "ais-streamer-";
const REQUEST_CHANNEL_CAPACITY: usize = 100;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DISCONNECT_GRACE: Duration = Duration::from_secs(2);
const EVENT_LOOP_ERROR_PAUSE: Duration = Duration::from_secs(1);

pub(crate) struct MqttPublisher {
    options: MqttOptions,
    client: Mutex<Option<AsyncClient>>,
    event_loop: Mutex<Option<JoinHandle<()>>>,
}

impl MqttPublisher {
    pub(crate) fn new(config: &BrokerConfig) -> Result<Self> {
        Ok(Self {
            options: mqtt_options(config)?,
            client: Mutex::new(None),
            event_loop: Mutex::new(None),
        })
    }
}

#[async_trait]
impl BrokerPublisher for MqttPublisher {
    async fn connect(&self) -> Result<(), BridgeError> {
        let (client, mut event_loop) =
            AsyncClient::new(self.options.clone(), REQUEST_CHANNEL_CAPACITY);

        tokio::time::timeout(CONNECT_TIMEOUT, wait_for_connack(&mut event_loop))
            .await
            .map_err(|_| {
                BridgeError::BrokerConnect(format!(
                    "no CONNACK within {}s",
                    CONNECT_TIMEOUT.as_secs()
                ))
            })??;

        *self.event_loop.lock().await = Some(tokio::spawn(drive_event_loop(event_loop)));
        *self.client.lock().await = Some(client);
        Ok(())
    }

    async fn publish(&self, topic: &str, envelope: &Envelope) -> Result<(), BridgeError> {
        let payload = envelope.to_json_bytes()?;
        let client = self
            .client
            .lock()
            .await
            .clone()
            .ok_or(BridgeError::BrokerNotConnected)?;

        client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await
            .map_err(|err| BridgeError::BrokerPublish {
                topic: topic.to_string(),
                reason: err.to_string(),
            })
    }

    async fn disconnect(&self) -> Result<(), BridgeError> {
        let Some(client) = self.client.lock().await.take() else {
            return Ok(());
        };
        let result = client
            .disconnect()
            .await
            .map_err(|err| BridgeError::BrokerDisconnect(err.to_string()));

        if let Some(mut task) = self.event_loop.lock().await.take() {
            if tokio::time::timeout(DISCONNECT_GRACE, &mut task).await.is_err() {
                task.abort();
            }
        }
        result
    }
}

async fn wait_for_connack(event_loop: &mut EventLoop) -> Result<(), BridgeError> {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                return match ack.code {
                    ConnectReturnCode::Success => Ok(()),
                    code => Err(BridgeError::BrokerConnect(format!(
                        "broker refused connection: {code:?}"
                    ))),
                };
            }
            Ok(_) => {}
            Err(err) => return Err(BridgeError::BrokerConnect(err.to_string())),
        }
    }
}

/// Keeps the client's network loop turning until a DISCONNECT goes out.
async fn drive_event_loop(mut event_loop: EventLoop) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                debug!(component = COMPONENT, "disconnect sent; event loop stopping");
                return;
            }
            Ok(_) => {}
            Err(err) => {
                warn!(component = COMPONENT, err = %err, "broker connection error");
                tokio::time::sleep(EVENT_LOOP_ERROR_PAUSE).await;
            }
        }
    }
}

fn mqtt_options(config: &BrokerConfig) -> Result<MqttOptions> {
    let url = Url::parse(&config.url)
        .with_context(|| format!("invalid broker url '{}'", config.url))?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("broker url '{}' has no host", config.url))?;
    let (port, tls) = match url.scheme() {
        "mqtt" | "tcp" => (url.port().unwrap_or(1883), false),
        "mqtts" | "ssl" => (url.port().unwrap_or(8883), true),
        scheme => {
            return Err(anyhow!(
                "unsupported broker url scheme '{scheme}' (expected mqtt, tcp, mqtts or ssl)"
            ))
        }
    };

    let client_id = config
        .client_id
        .clone()
        .unwrap_or_else(|| format!("{CLIENT_ID_PREFIX}{}", Uuid::new_v4().simple()));

    let mut options = MqttOptions::new(client_id, host, port);
    options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));
    if let Some((username, password)) = credentials(config, &url) {
        options.set_credentials(username, password);
    }
    if tls {
        options.set_transport(Transport::tls_with_default_config());
    }
    Ok(options)
}

/// Explicit config values win over credentials embedded in the url.
fn credentials(config: &BrokerConfig, url: &Url) -> Option<(String, String)> {
    let username = config
        .username
        .clone()
        .or_else(|| Some(url.username().to_string()).filter(|name| !name.is_empty()))?;
    let password = config
        .password
        .clone()
        .or_else(|| url.password().map(str::to_string))
        .unwrap_or_default();
    Some((username, password))
}
