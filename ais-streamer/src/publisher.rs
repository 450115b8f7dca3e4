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

use crate::envelope::Envelope;
use crate::error::BridgeError;
use async_trait::async_trait;

///
/// [`BrokerPublisher`] owns the single connection to the pub/sub broker.
///
/// The connection is opened once by the supervisor and reused across every
/// stream reconnect; it is never rebuilt alongside the stream connection.
///
/// # Examples
///
/// ```
/// use ais_streamer::{BridgeError, BrokerPublisher, Envelope};
/// use async_trait::async_trait;
///
/// struct StdoutPublisher;
///
/// #[async_trait]
/// impl BrokerPublisher for StdoutPublisher {
///     async fn connect(&self) -> Result<(), BridgeError> {
///         Ok(())
///     }
///
///     async fn publish(&self, topic: &str, envelope: &Envelope) -> Result<(), BridgeError> {
///         let payload = envelope.to_json_bytes()?;
///         println!("{topic}: {}", String::from_utf8_lossy(&payload));
///         Ok(())
///     }
///
///     async fn disconnect(&self) -> Result<(), BridgeError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait BrokerPublisher: Send + Sync {
    /// Opens the broker connection. A failure here is fatal to the process.
    async fn connect(&self) -> Result<(), BridgeError>;

    /// Serializes `envelope` and hands it to the broker client.
    async fn publish(&self, topic: &str, envelope: &Envelope) -> Result<(), BridgeError>;

    /// Releases the broker connection. Calling it more than once is a no-op.
    async fn disconnect(&self) -> Result<(), BridgeError>;
}
