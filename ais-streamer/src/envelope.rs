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

//! Canonical geospatial envelope handed to the broker.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Full positional replace.
    Put,
    /// Partial attribute merge.
    Patch,
    /// One-time reset emitted on startup.
    Clear,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
}

impl Geometry {
    pub fn point(longitude: f64, latitude: f64) -> Self {
        Geometry::Point {
            coordinates: [longitude, latitude],
        }
    }

    pub fn coordinates(&self) -> [f64; 2] {
        match self {
            Geometry::Point { coordinates } => *coordinates,
        }
    }
}

/// One outbound record.
///
/// Data envelopes serialize as `{action, id, geometry?, properties}` with `id`
/// written as `null` when unknown. The clear signal serializes as
/// `{"action":"CLEAR"}` and nothing else.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Envelope {
    pub action: Action,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Envelope {
    pub fn clear() -> Self {
        Self {
            action: Action::Clear,
            id: None,
            geometry: None,
            properties: Map::new(),
        }
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.action == Action::Clear {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("action", &self.action)?;
            return map.end();
        }

        let len = if self.geometry.is_some() { 4 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("action", &self.action)?;
        map.serialize_entry("id", &self.id)?;
        if let Some(geometry) = &self.geometry {
            map.serialize_entry("geometry", geometry)?;
        }
        map.serialize_entry("properties", &self.properties)?;
        map.end()
    }
}
