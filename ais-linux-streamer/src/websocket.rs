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

//! WebSocket-backed [`StreamTransport`].

use ais_streamer::{BridgeError, StreamEvent, StreamSession, StreamTransport};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::trace;

const COMPONENT: &str = "websocket_transport";

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WebSocketTransport;

#[async_trait]
impl StreamTransport for WebSocketTransport {
    async fn connect(&self, url: &str) -> Result<Box<dyn StreamSession>, BridgeError> {
        let (socket, response) =
            connect_async(url)
                .await
                .map_err(|err| BridgeError::StreamConnect {
                    url: url.to_string(),
                    reason: err.to_string(),
                })?;
        trace!(
            component = COMPONENT,
            status = response.status().as_u16(),
            "websocket handshake complete"
        );
        Ok(Box::new(WebSocketSession { socket }))
    }
}

struct WebSocketSession {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl StreamSession for WebSocketSession {
    async fn send_text(&mut self, text: String) -> Result<(), BridgeError> {
        self.socket
            .send(Message::Text(text))
            .await
            .map_err(|err| BridgeError::StreamSend(err.to_string()))
    }

    async fn next_event(&mut self) -> StreamEvent {
        loop {
            let frame = match self.socket.next().await {
                None => return StreamEvent::Closed,
                Some(Err(err)) => return StreamEvent::Error(err.to_string()),
                Some(Ok(frame)) => frame,
            };
            if let Some(event) = frame_to_event(frame) {
                return event;
            }
        }
    }
}

/// Maps a frame to a stream event. Control frames yield `None`; tungstenite answers
/// pings on its own.
fn frame_to_event(frame: Message) -> Option<StreamEvent> {
    match frame {
        Message::Text(text) => Some(StreamEvent::Text(text)),
        Message::Binary(bytes) => Some(StreamEvent::Text(
            String::from_utf8_lossy(&bytes).into_owned(),
        )),
        Message::Close(_) => Some(StreamEvent::Closed),
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => None,
    }
}
