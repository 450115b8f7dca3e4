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

mod config;
mod mqtt;
mod os_signals;
mod websocket;

use crate::config::{parse_bounding_boxes, Config, Overrides};
use crate::mqtt::MqttPublisher;
use crate::os_signals::wait_for_shutdown_signal;
use crate::websocket::WebSocketTransport;
use ais_streamer::{BoundingBox, BrokerPublisher, StreamConnector, Supervisor};
use anyhow::{Context, Result};
use clap::Parser;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Parsed `--bounding-boxes` value; kept whole so clap does not split it.
#[derive(Clone, Debug)]
struct BoundingBoxes(Vec<BoundingBox>);

fn parse_bounding_boxes_arg(raw: &str) -> Result<BoundingBoxes, String> {
    parse_bounding_boxes(raw).map(BoundingBoxes)
}

#[derive(Parser)]
#[command(version, about = "Bridges the AIS vessel stream onto an MQTT broker")]
struct StreamerArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,

    /// Stream API key
    #[arg(long, env = "AISSTREAM_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Optional topic segment inserted after the base path
    #[arg(long, env = "AIS_GROUP_ID")]
    group_id: Option<String>,

    /// JSON list of [[lat, lon], [lat, lon]] boxes
    #[arg(long, env = "AIS_BOUNDING_BOXES", value_parser = parse_bounding_boxes_arg)]
    bounding_boxes: Option<BoundingBoxes>,

    #[arg(long, env = "MQTT_BROKER_URL")]
    broker_url: Option<String>,

    #[arg(long, env = "MQTT_USERNAME")]
    broker_username: Option<String>,

    #[arg(long, env = "MQTT_PASSWORD", hide_env_values = true)]
    broker_password: Option<String>,
}

impl StreamerArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            group_id: self.group_id.clone(),
            bounding_boxes: self.bounding_boxes.clone().map(|boxes| boxes.0),
            broker_url: self.broker_url.clone(),
            broker_username: self.broker_username.clone(),
            broker_password: self.broker_password.clone(),
        }
    }
}

async fn shutdown_requested() {
    wait_for_shutdown(wait_for_shutdown_signal(), tokio::signal::ctrl_c()).await
}

/// Resolves once `signals` or, if it cannot be installed, `fallback` fires. When
/// neither can be installed the bridge runs until killed.
async fn wait_for_shutdown<S, F>(signals: S, fallback: F)
where
    S: Future<Output = std::io::Result<()>>,
    F: Future<Output = std::io::Result<()>>,
{
    let Err(err) = signals.await else {
        return;
    };
    warn!(err = %err, "unable to install signal handlers, falling back to ctrl-c");

    if let Err(err) = fallback.await {
        error!(err = %err, "unable to listen for ctrl-c; graceful shutdown unavailable");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Started ais-linux-streamer");

    let args = StreamerArgs::parse();
    let mut config = Config::from_file(&args.config)?;
    config.apply_overrides(args.overrides());
    config.validate()?;

    let publisher = Arc::new(MqttPublisher::new(&config.broker)?);
    let connector = StreamConnector::new(
        config.stream_settings(),
        Arc::new(WebSocketTransport),
        publisher.clone(),
        config.topic_router(),
    );
    let supervisor = Supervisor::new(publisher as Arc<dyn BrokerPublisher>, connector);

    supervisor
        .run_until(shutdown_requested())
        .await
        .context("Unable to reach the broker")?;

    info!("ais-linux-streamer stopped");
    Ok(())
}
