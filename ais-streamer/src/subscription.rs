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

//! Subscription request sent once per stream connection.

use crate::upstream::MessageType;
use serde::{Deserialize, Serialize};

/// Two `[latitude, longitude]` corners.
pub type BoundingBox = [[f64; 2]; 2];

/// The whole globe.
pub fn default_bounding_boxes() -> Vec<BoundingBox> {
    vec![[[-90.0, -180.0], [90.0, 180.0]]]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    #[serde(rename = "APIkey")]
    pub api_key: String,
    #[serde(rename = "BoundingBoxes")]
    pub bounding_boxes: Vec<BoundingBox>,
    #[serde(
        rename = "FiltersShipMMSI",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ship_mmsi_filter: Option<Vec<String>>,
    #[serde(
        rename = "FilterMessageTypes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub message_type_filter: Option<Vec<MessageType>>,
}

impl SubscriptionRequest {
    pub fn new(api_key: impl Into<String>, bounding_boxes: Vec<BoundingBox>) -> Self {
        Self {
            api_key: api_key.into(),
            bounding_boxes,
            ship_mmsi_filter: None,
            message_type_filter: None,
        }
    }

    pub fn with_ship_mmsi_filter(mut self, mmsi: Vec<String>) -> Self {
        self.ship_mmsi_filter = Some(mmsi);
        self
    }

    pub fn with_message_type_filter(mut self, message_types: Vec<MessageType>) -> Self {
        self.message_type_filter = Some(message_types);
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
