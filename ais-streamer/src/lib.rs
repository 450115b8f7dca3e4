/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
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

//! # ais-streamer
//!
//! `ais-streamer` bridges a live AIS vessel-tracking stream onto a publish/subscribe
//! broker. Every upstream record is normalized into a GeoJSON-flavoured [`Envelope`]
//! and routed to a topic derived from its message type and vessel identity.
//!
//! Typical usage is API-first and centered on [`StreamConnector`] and [`Supervisor`];
//! the broker and the stream are reached through the [`BrokerPublisher`] and
//! [`StreamTransport`] traits so concrete clients live in the binaries.
//!
//! ## Transform and route
//!
//! ```
//! use ais_streamer::{parse_event, transform, Action, TopicRouter};
//!
//! let record = parse_event(
//!     r#"{
//!         "MessageType": "PositionReport",
//!         "Message": {"PositionReport": {"Longitude": 10.5, "Latitude": 55.2}},
//!         "MetaData": {"MMSI": 999, "ShipName": "NORDIC"}
//!     }"#,
//! )
//! .unwrap();
//!
//! let (category, envelope) = transform(&record).unwrap();
//! assert_eq!(envelope.action, Action::Put);
//! assert_eq!(envelope.geometry.unwrap().coordinates(), [10.5, 55.2]);
//!
//! let router = TopicRouter::new("producers/aisstream/data", None);
//! assert_eq!(
//!     router.route(&category, envelope.id),
//!     "producers/aisstream/data/PositionReport/999"
//! );
//! assert_eq!(router.control_topic(), "producers/aisstream/control");
//! ```
//!
//! ## Internal architecture map
//!
//! - Upstream model: tagged-union records and typed sub-records
//! - Transform: pure record-to-envelope mapping
//! - Topic: destination and control topic naming
//! - Connector: stream session state machine with fixed-delay reconnect
//! - Supervisor: broker lifecycle, startup clear signal, shutdown
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

mod connector;
pub use connector::{
    ConnectionState, EventOutcome, StreamConnector, StreamEvent, StreamSession, StreamSettings,
    StreamTransport, RECONNECT_DELAY,
};

mod envelope;
pub use envelope::{Action, Envelope, Geometry};

mod error;
pub use error::BridgeError;

#[doc(hidden)]
pub mod observability;

mod publisher;
pub use publisher::BrokerPublisher;

mod subscription;
pub use subscription::{default_bounding_boxes, BoundingBox, SubscriptionRequest};

mod supervisor;
pub use supervisor::Supervisor;

pub mod topic;
pub use topic::TopicRouter;

mod transform;
pub use transform::transform;

mod upstream;
pub use upstream::{
    parse_event, MessageType, MetaData, PositionReport, ShipStaticData, UpstreamMessage,
};
