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

use thiserror::Error;

/// Failures surfaced by the broker and stream collaborators.
///
/// Only [`BridgeError::BrokerConnect`], returned from the supervisor at startup,
/// stops the process; every other variant is logged and the bridge keeps running.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("unable to connect to broker: {0}")]
    BrokerConnect(String),

    #[error("unable to publish on topic '{topic}': {reason}")]
    BrokerPublish { topic: String, reason: String },

    #[error("unable to disconnect from broker: {0}")]
    BrokerDisconnect(String),

    #[error("broker connection is not established")]
    BrokerNotConnected,

    #[error("unable to open stream '{url}': {reason}")]
    StreamConnect { url: String, reason: String },

    #[error("unable to send on stream: {0}")]
    StreamSend(String),

    #[error("unable to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}
