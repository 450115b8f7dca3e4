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

//! Destination topic naming.

use crate::upstream::MessageType;

const DATA_SEGMENT: &str = "data";
const CONTROL_SEGMENT: &str = "control";
const MISSING_ID_SEGMENT: &str = "null";

/// Builds `base[/group]/<category>/<id>` topics for one configured base path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicRouter {
    base_path: String,
    group_id: Option<String>,
}

impl TopicRouter {
    pub fn new(base_path: impl Into<String>, group_id: Option<String>) -> Self {
        Self {
            base_path: base_path.into(),
            group_id: group_id.filter(|group| !group.is_empty()),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn route(&self, category: &MessageType, id: Option<u64>) -> String {
        route(&self.base_path, category, id, self.group_id.as_deref())
    }

    pub fn control_topic(&self) -> String {
        control_topic(&self.base_path)
    }
}

pub fn route(
    base_path: &str,
    category: &MessageType,
    id: Option<u64>,
    group_id: Option<&str>,
) -> String {
    let id = id.map_or_else(|| MISSING_ID_SEGMENT.to_string(), |id| id.to_string());
    match group_id {
        Some(group) => format!("{base_path}/{group}/{category}/{id}"),
        None => format!("{base_path}/{category}/{id}"),
    }
}

/// Swaps a third `data` segment for `control`; any other shape is returned as is.
pub fn control_topic(base_path: &str) -> String {
    let mut segments: Vec<&str> = base_path.split('/').collect();
    if segments.len() >= 3 && segments[2] == DATA_SEGMENT {
        segments[2] = CONTROL_SEGMENT;
        return segments.join("/");
    }
    base_path.to_string()
}
