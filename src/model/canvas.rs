// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Raw JSON Canvas records.
//!
//! These mirror the on-disk `.canvas` format loosely: every field is optional so that partially
//! written or hand-edited files still deserialize. Defaults are substituted by the graph builder,
//! and structural problems (missing ids, dangling edges) are reported there, not here.

use serde::{Deserialize, Serialize};

use super::geometry::BoundingBox;

pub const DEFAULT_NODE_WIDTH: f64 = 100.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 100.0;
pub const DEFAULT_GROUP_WIDTH: f64 = 200.0;
pub const DEFAULT_GROUP_HEIGHT: f64 = 150.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCanvas {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
    /// Explicit groups. JSON Canvas files normally express groups as nodes of type `group`;
    /// this list exists for callers that already separated them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<RawGroup>,
}

impl RawCanvas {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Number of group records, counting both explicit groups and `group` nodes.
    pub fn group_count(&self) -> usize {
        self.groups.len()
            + self
                .nodes
                .iter()
                .filter(|node| node.kind.as_deref() == Some("group"))
                .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub border_color: Option<String>,
}

impl RawNode {
    pub fn text(id: &str, text: &str) -> Self {
        Self {
            id: Some(id.to_owned()),
            kind: Some("text".to_owned()),
            text: Some(text.to_owned()),
            ..Self::default()
        }
    }

    pub fn file(id: &str, file: &str) -> Self {
        Self {
            id: Some(id.to_owned()),
            kind: Some("file".to_owned()),
            file: Some(file.to_owned()),
            ..Self::default()
        }
    }

    pub fn group(id: &str, label: &str) -> Self {
        Self {
            id: Some(id.to_owned()),
            kind: Some("group".to_owned()),
            label: Some(label.to_owned()),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn is_group(&self) -> bool {
        self.kind.as_deref() == Some("group")
    }

    /// Bounds with missing fields defaulted; group nodes get the larger group default size.
    pub fn bounds(&self) -> BoundingBox {
        let (default_width, default_height) = if self.is_group() {
            (DEFAULT_GROUP_WIDTH, DEFAULT_GROUP_HEIGHT)
        } else {
            (DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT)
        };
        BoundingBox::new(
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            self.width.unwrap_or(default_width),
            self.height.unwrap_or(default_height),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEdge {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "from")]
    pub from_node: Option<String>,
    #[serde(default, alias = "to")]
    pub to_node: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub to_end: Option<String>,
}

impl RawEdge {
    pub fn new(id: &str, from: &str, to: &str) -> Self {
        Self {
            id: Some(id.to_owned()),
            from_node: Some(from.to_owned()),
            to_node: Some(to.to_owned()),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_owned());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl RawGroup {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            self.width.unwrap_or(DEFAULT_GROUP_WIDTH),
            self.height.unwrap_or(DEFAULT_GROUP_HEIGHT),
        )
    }
}
