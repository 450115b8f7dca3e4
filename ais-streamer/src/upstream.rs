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

//! Upstream AIS stream records.
//!
//! Each record is a tagged union: `MessageType` names the variant and `Message`
//! holds exactly one sub-record keyed by that same name. Sub-records are kept as
//! open attribute maps so fields this crate does not know about survive the
//! transform untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

macro_rules! message_types {
    ($($variant:ident),+ $(,)?) => {
        /// Variant names emitted by the upstream feed.
        ///
        /// Names outside the known set are preserved verbatim in
        /// [`MessageType::Other`].
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum MessageType {
            $($variant,)+
            Other(String),
        }

        impl MessageType {
            pub fn as_str(&self) -> &str {
                match self {
                    $(MessageType::$variant => stringify!($variant),)+
                    MessageType::Other(name) => name.as_str(),
                }
            }
        }

        impl From<String> for MessageType {
            fn from(name: String) -> Self {
                match name.as_str() {
                    $(stringify!($variant) => MessageType::$variant,)+
                    _ => MessageType::Other(name),
                }
            }
        }
    };
}

message_types! {
    PositionReport,
    UnknownMessage,
    AddressedSafetyMessage,
    AddressedBinaryMessage,
    AidsToNavigationReport,
    AssignedModeCommand,
    BaseStationReport,
    BinaryAcknowledge,
    BinaryBroadcastMessage,
    ChannelManagement,
    CoordinatedUTCInquiry,
    DataLinkManagementMessage,
    DataLinkManagementMessageData,
    ExtendedClassBPositionReport,
    GroupAssignmentCommand,
    GnssBroadcastBinaryMessage,
    Interrogation,
    LongRangeAisBroadcastMessage,
    MultiSlotBinaryMessage,
    SafetyBroadcastMessage,
    ShipStaticData,
    SingleSlotBinaryMessage,
    StandardClassBPositionReport,
    StandardSearchAndRescueAircraftReport,
    StaticDataReport,
}

impl MessageType {
    pub fn is_known(&self) -> bool {
        !matches!(self, MessageType::Other(_))
    }

    /// Only these categories are consumed downstream; everything else is
    /// transformed and then dropped before publishing.
    pub fn is_published(&self) -> bool {
        matches!(self, MessageType::PositionReport | MessageType::ShipStaticData)
    }
}

impl From<&str> for MessageType {
    fn from(name: &str) -> Self {
        MessageType::from(name.to_string())
    }
}

impl From<MessageType> for String {
    fn from(message_type: MessageType) -> Self {
        match message_type {
            MessageType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity block attached to every upstream record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaData {
    #[serde(
        rename = "MMSI",
        default,
        deserialize_with = "lenient_mmsi",
        skip_serializing_if = "Option::is_none"
    )]
    pub mmsi: Option<u64>,
    #[serde(
        rename = "ShipName",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub ship_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts a numeric or numeric-string MMSI; any other shape reads as absent.
fn lenient_mmsi<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Non-string ship names read as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

impl MetaData {
    /// Ship name with the AIS space padding removed, for log lines.
    pub fn display_name(&self) -> &str {
        self.ship_name.as_deref().map(str::trim).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamMessage {
    #[serde(rename = "MessageType", default)]
    pub message_type: Option<MessageType>,
    #[serde(rename = "Message", default)]
    pub message: Option<Map<String, Value>>,
    #[serde(rename = "MetaData", default)]
    pub meta_data: Option<MetaData>,
}

impl UpstreamMessage {
    /// The sub-record stored under the declared variant name, if it is an object.
    pub fn sub_record(&self) -> Option<&Map<String, Value>> {
        let message_type = self.message_type.as_ref()?;
        self.message
            .as_ref()?
            .get(message_type.as_str())?
            .as_object()
    }
}

/// Decodes one inbound stream payload.
pub fn parse_event(text: &str) -> Result<UpstreamMessage, serde_json::Error> {
    serde_json::from_str(text)
}

/// Positional sub-record. Coordinates are typed, everything else rides along.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    #[serde(rename = "Longitude", default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "Latitude", default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl PositionReport {
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record.clone()))
    }

    /// `[longitude, latitude]` when both are present.
    pub fn coordinates(&self) -> Option<[f64; 2]> {
        Some([self.longitude?, self.latitude?])
    }
}

/// Static voyage data sub-record with its transport bookkeeping split out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipStaticData {
    #[serde(rename = "MessageID", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Value>,
    #[serde(rename = "RepeatIndicator", default, skip_serializing_if = "Option::is_none")]
    pub repeat_indicator: Option<Value>,
    #[serde(rename = "Spare", default, skip_serializing_if = "Option::is_none")]
    pub spare: Option<Value>,
    #[serde(rename = "UserID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
    #[serde(rename = "Valid", default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ShipStaticData {
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_type_round_trips_known_and_unknown_names() {
        assert_eq!(
            MessageType::from("PositionReport"),
            MessageType::PositionReport
        );
        assert_eq!(
            MessageType::from("CoordinatedUTCInquiry"),
            MessageType::CoordinatedUTCInquiry
        );

        let other = MessageType::from("FutureVariant");
        assert_eq!(other, MessageType::Other("FutureVariant".to_string()));
        assert_eq!(other.as_str(), "FutureVariant");
        assert!(!other.is_known());
        assert_eq!(String::from(other), "FutureVariant");
    }

    #[test]
    fn only_position_and_static_data_are_published() {
        assert!(MessageType::PositionReport.is_published());
        assert!(MessageType::ShipStaticData.is_published());
        assert!(!MessageType::BaseStationReport.is_published());
        assert!(!MessageType::StandardClassBPositionReport.is_published());
        assert!(!MessageType::from("Mystery").is_published());
    }

    #[test]
    fn parse_event_reads_wire_names() {
        let message = parse_event(
            r#"{
                "MessageType": "PositionReport",
                "Message": {"PositionReport": {"Longitude": 1.5, "Latitude": 2.5}},
                "MetaData": {"MMSI": 123, "ShipName": "ALPHA   ", "time_utc": "now"}
            }"#,
        )
        .expect("record should parse");

        assert_eq!(message.message_type, Some(MessageType::PositionReport));
        let meta = message.meta_data.as_ref().expect("metadata present");
        assert_eq!(meta.mmsi, Some(123));
        assert_eq!(meta.display_name(), "ALPHA");
        assert_eq!(meta.extra.get("time_utc"), Some(&json!("now")));
        assert!(message.sub_record().is_some());
    }

    #[test]
    fn parse_event_tolerates_missing_sections() {
        let message = parse_event(r#"{"MessageType": "ShipStaticData"}"#).expect("parses");

        assert!(message.message.is_none());
        assert!(message.meta_data.is_none());
        assert!(message.sub_record().is_none());
    }

    #[test]
    fn metadata_with_odd_shapes_still_parses() {
        let message = parse_event(
            r#"{"MessageType": "PositionReport", "MetaData": {"MMSI": "211000001", "ShipName": 42}}"#,
        )
        .expect("record should parse");
        let meta = message.meta_data.expect("metadata present");

        assert_eq!(meta.mmsi, Some(211000001));
        assert_eq!(meta.ship_name, None);

        let message = parse_event(r#"{"MetaData": {"MMSI": "unknown", "ShipName": null}}"#)
            .expect("record should parse");
        let meta = message.meta_data.expect("metadata present");
        assert_eq!(meta.mmsi, None);
        assert_eq!(meta.ship_name, None);
    }

    #[test]
    fn parse_event_rejects_non_json() {
        assert!(parse_event("not json").is_err());
    }

    #[test]
    fn sub_record_requires_matching_key() {
        let message = parse_event(
            r#"{"MessageType": "ShipStaticData", "Message": {"PositionReport": {}}, "MetaData": {}}"#,
        )
        .expect("parses");

        assert!(message.sub_record().is_none());
    }

    #[test]
    fn position_report_keeps_unknown_fields() {
        let record = json!({"Longitude": 3.0, "Latitude": 4.0, "Sog": 12.1, "NewField": [1]});
        let report = PositionReport::from_record(record.as_object().unwrap()).unwrap();

        assert_eq!(report.coordinates(), Some([3.0, 4.0]));
        assert_eq!(report.attributes.get("Sog"), Some(&json!(12.1)));
        assert_eq!(report.attributes.get("NewField"), Some(&json!([1])));
    }

    #[test]
    fn ship_static_data_splits_administrative_fields() {
        let record = json!({
            "MessageID": 5,
            "RepeatIndicator": 0,
            "Spare": false,
            "UserID": 99,
            "Valid": true,
            "Destination": "OSLO"
        });
        let data = ShipStaticData::from_record(record.as_object().unwrap()).unwrap();

        assert_eq!(data.user_id, Some(json!(99)));
        assert_eq!(data.attributes.len(), 1);
        assert_eq!(data.attributes.get("Destination"), Some(&json!("OSLO")));
    }
}
