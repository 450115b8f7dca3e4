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

//! Structured field value-format helpers.

pub const NONE: &str = "none";
pub const MAX_PAYLOAD_PREVIEW_CHARS: usize = 120;

pub fn format_entity_id(id: Option<u64>) -> String {
    id.map_or_else(|| NONE.to_string(), |id| id.to_string())
}

/// Truncated payload for malformed-event logs.
pub fn payload_preview(payload: &str) -> String {
    if payload.chars().count() <= MAX_PAYLOAD_PREVIEW_CHARS {
        return payload.to_string();
    }
    let mut preview: String = payload.chars().take(MAX_PAYLOAD_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
