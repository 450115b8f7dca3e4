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

//! Maps one upstream record onto a canonical [`Envelope`].
//!
//! The transform is pure: the same input always yields a structurally identical
//! envelope, and malformed shapes degrade to "no envelope" instead of failing.

use crate::envelope::{Action, Envelope, Geometry};
use crate::upstream::{MessageType, MetaData, PositionReport, ShipStaticData, UpstreamMessage};
use serde_json::{Map, Value};

const SHIP_NAME: &str = "ShipName";

/// Returns the routing category and envelope, or `None` when the record has no
/// `MetaData` or no sub-record under its declared `MessageType`.
pub fn transform(message: &UpstreamMessage) -> Option<(MessageType, Envelope)> {
    let category = message.message_type.as_ref()?;
    let meta = message.meta_data.as_ref()?;
    let record = message.sub_record()?;

    let envelope = match category {
        MessageType::PositionReport => position_envelope(record, meta),
        MessageType::ShipStaticData => patch(meta, static_data_properties(category, record)),
        MessageType::Other(_) => patch(meta, Map::new()),
        known => {
            let mut properties = Map::new();
            properties.insert(known.as_str().to_string(), Value::Object(record.clone()));
            patch(meta, properties)
        }
    };

    Some((category.clone(), envelope))
}

fn patch(meta: &MetaData, properties: Map<String, Value>) -> Envelope {
    Envelope {
        action: Action::Patch,
        id: meta.mmsi,
        geometry: None,
        properties,
    }
}

fn position_envelope(record: &Map<String, Value>, meta: &MetaData) -> Envelope {
    // Non-numeric coordinates leave the record without a geometry.
    let geometry = PositionReport::from_record(record)
        .ok()
        .and_then(|report| report.coordinates())
        .map(|[longitude, latitude]| Geometry::point(longitude, latitude));

    let mut properties = record.clone();
    properties.insert(
        SHIP_NAME.to_string(),
        Value::String(meta.ship_name.clone().unwrap_or_default()),
    );

    Envelope {
        action: Action::Put,
        id: meta.mmsi,
        geometry,
        properties,
    }
}

fn static_data_properties(
    category: &MessageType,
    record: &Map<String, Value>,
) -> Map<String, Value> {
    let mut properties = match ShipStaticData::from_record(record) {
        Ok(data) => data.attributes,
        Err(_) => record.clone(),
    };
    properties.insert(category.as_str().to_string(), Value::Object(record.clone()));
    properties
}
