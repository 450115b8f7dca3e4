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
    default_bounding_boxes, BoundingBox, MessageType, StreamSettings, SubscriptionRequest,
    TopicRouter,
};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub(crate) const DEFAULT_STREAM_URL: &str = "wss://stream.aisstream.io/v0/stream";
pub(crate) const DEFAULT_BASE_PATH: &str = "producers/aisstream/data";
const DEFAULT_KEEP_ALIVE_SECS: u16 = 30;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) broker: BrokerConfig,
    #[serde(default)]
    pub(crate) stream: StreamConfig,
    #[serde(default)]
    pub(crate) topics: TopicConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BrokerConfig {
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) username: Option<String>,
    #[serde(default)]
    pub(crate) password: Option<String>,
    #[serde(default)]
    pub(crate) client_id: Option<String>,
    #[serde(default = "default_keep_alive_secs")]
    pub(crate) keep_alive_secs: u16,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct StreamConfig {
    #[serde(default = "default_stream_url")]
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) api_key: String,
    #[serde(default)]
    pub(crate) bounding_boxes: Option<Vec<BoundingBox>>,
    #[serde(default)]
    pub(crate) ship_mmsi_filter: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) message_type_filter: Option<Vec<MessageType>>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct TopicConfig {
    #[serde(default = "default_base_path")]
    pub(crate) base_path: String,
    #[serde(default)]
    pub(crate) group_id: Option<String>,
}

/// Values supplied on the command line or through the environment. Each one that
/// is set replaces the corresponding file value.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub(crate) api_key: Option<String>,
    pub(crate) group_id: Option<String>,
    pub(crate) bounding_boxes: Option<Vec<BoundingBox>>,
    pub(crate) broker_url: Option<String>,
    pub(crate) broker_username: Option<String>,
    pub(crate) broker_password: Option<String>,
}

fn default_keep_alive_secs() -> u16 {
    DEFAULT_KEEP_ALIVE_SECS
}

fn default_stream_url() -> String {
    DEFAULT_STREAM_URL.to_string()
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: default_stream_url(),
            api_key: String::new(),
            bounding_boxes: None,
            ship_mmsi_filter: None,
            message_type_filter: None,
        }
    }
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            group_id: None,
        }
    }
}

impl Config {
    pub(crate) fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file: {}", path.display()))?;
        Self::from_json5(&contents)
            .with_context(|| format!("Unable to parse config file: {}", path.display()))
    }

    pub(crate) fn from_json5(contents: &str) -> Result<Self> {
        json5::from_str(contents).map_err(|e| anyhow!("{e}"))
    }

    pub(crate) fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(api_key) = overrides.api_key {
            self.stream.api_key = api_key;
        }
        if let Some(group_id) = overrides.group_id {
            self.topics.group_id = Some(group_id);
        }
        if let Some(bounding_boxes) = overrides.bounding_boxes {
            self.stream.bounding_boxes = Some(bounding_boxes);
        }
        if let Some(url) = overrides.broker_url {
            self.broker.url = url;
        }
        if let Some(username) = overrides.broker_username {
            self.broker.username = Some(username);
        }
        if let Some(password) = overrides.broker_password {
            self.broker.password = Some(password);
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.stream.api_key.trim().is_empty() {
            return Err(anyhow!(
                "No stream API key configured (set stream.api_key or AISSTREAM_API_KEY)"
            ));
        }
        if self.broker.url.trim().is_empty() {
            return Err(anyhow!("No broker url configured"));
        }
        if self.topics.base_path.trim().is_empty() {
            return Err(anyhow!("No base topic path configured"));
        }
        if let Some(boxes) = &self.stream.bounding_boxes {
            if boxes.is_empty() {
                return Err(anyhow!("bounding_boxes must contain at least one box"));
            }
        }
        Ok(())
    }

    pub(crate) fn subscription_request(&self) -> SubscriptionRequest {
        let bounding_boxes = self
            .stream
            .bounding_boxes
            .clone()
            .unwrap_or_else(default_bounding_boxes);
        let mut request = SubscriptionRequest::new(self.stream.api_key.clone(), bounding_boxes);
        if let Some(mmsi) = &self.stream.ship_mmsi_filter {
            request = request.with_ship_mmsi_filter(mmsi.clone());
        }
        if let Some(message_types) = &self.stream.message_type_filter {
            request = request.with_message_type_filter(message_types.clone());
        }
        request
    }

    pub(crate) fn stream_settings(&self) -> StreamSettings {
        StreamSettings::new(self.stream.url.clone(), self.subscription_request())
    }

    pub(crate) fn topic_router(&self) -> TopicRouter {
        TopicRouter::new(self.topics.base_path.clone(), self.topics.group_id.clone())
    }
}

/// Parses a JSON list of `[[lat, lon], [lat, lon]]` boxes.
pub(crate) fn parse_bounding_boxes(raw: &str) -> Result<Vec<BoundingBox>, String> {
    let boxes: Vec<BoundingBox> = serde_json::from_str(raw).map_err(|e| {
        format!("invalid bounding boxes '{raw}' (expected [[[lat, lon], [lat, lon]], ...]): {e}")
    })?;
    if boxes.is_empty() {
        return Err(format!("invalid bounding boxes '{raw}': at least one box is required"));
    }
    Ok(boxes)
}
