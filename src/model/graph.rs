// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canonical, validated graph produced by [`crate::graph::build_graph`].
//!
//! Every item keeps its original canvas id next to the flowchart-safe token derived from it.
//! Items are stored in source order; the serializer relies on that order for deterministic output.

use std::fmt;

use super::geometry::BoundingBox;
use super::ids::{EdgeId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    FileReference,
    ExternalLink,
    Image,
    Group,
}

impl NodeKind {
    /// Maps a JSON Canvas `type` string. Unknown types are classified by their payload.
    pub fn classify(kind: Option<&str>, file: Option<&str>, url: Option<&str>) -> Self {
        match kind {
            Some("text") => Self::Text,
            Some("file") => Self::FileReference,
            Some("link") => Self::ExternalLink,
            Some("image") => Self::Image,
            Some("group") => Self::Group,
            _ if file.is_some() => Self::FileReference,
            _ if url.is_some() => Self::ExternalLink,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::FileReference => "file",
            Self::ExternalLink => "link",
            Self::Image => "image",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStyle {
    pub background_color: Option<String>,
    pub border_color: Option<String>,
}

impl NodeStyle {
    pub fn is_default(&self) -> bool {
        self.background_color.is_none() && self.border_color.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasNode {
    source_id: NodeId,
    mermaid_id: String,
    kind: NodeKind,
    text: Option<String>,
    label: Option<String>,
    file: Option<String>,
    url: Option<String>,
    bounds: BoundingBox,
    style: NodeStyle,
}

impl CanvasNode {
    pub fn new(source_id: NodeId, mermaid_id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            source_id,
            mermaid_id: mermaid_id.into(),
            kind,
            text: None,
            label: None,
            file: None,
            url: None,
            bounds: BoundingBox::default(),
            style: NodeStyle::default(),
        }
    }

    pub fn with_text<T: Into<String>>(mut self, text: Option<T>) -> Self {
        self.text = text.map(Into::into);
        self
    }

    pub fn with_label<T: Into<String>>(mut self, label: Option<T>) -> Self {
        self.label = label.map(Into::into);
        self
    }

    pub fn with_file<T: Into<String>>(mut self, file: Option<T>) -> Self {
        self.file = file.map(Into::into);
        self
    }

    pub fn with_url<T: Into<String>>(mut self, url: Option<T>) -> Self {
        self.url = url.map(Into::into);
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn source_id(&self) -> &NodeId {
        &self.source_id
    }

    pub fn mermaid_id(&self) -> &str {
        &self.mermaid_id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "solid" => Some(Self::Solid),
            "dashed" => Some(Self::Dashed),
            "dotted" => Some(Self::Dotted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeStyle {
    pub color: Option<String>,
    pub width: Option<f64>,
    pub line: Option<LineStyle>,
    pub arrow: Option<String>,
}

impl EdgeStyle {
    /// True when nothing would change the default edge stroke.
    pub fn is_default(&self) -> bool {
        self.color.is_none()
            && self.width.is_none()
            && matches!(self.line, None | Some(LineStyle::Solid))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasEdge {
    source_id: EdgeId,
    from_mermaid_id: String,
    to_mermaid_id: String,
    label: Option<String>,
    style: EdgeStyle,
}

impl CanvasEdge {
    pub fn new(
        source_id: EdgeId,
        from_mermaid_id: impl Into<String>,
        to_mermaid_id: impl Into<String>,
    ) -> Self {
        Self {
            source_id,
            from_mermaid_id: from_mermaid_id.into(),
            to_mermaid_id: to_mermaid_id.into(),
            label: None,
            style: EdgeStyle::default(),
        }
    }

    pub fn with_label<T: Into<String>>(mut self, label: Option<T>) -> Self {
        self.label = label.map(Into::into);
        self
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn source_id(&self) -> &EdgeId {
        &self.source_id
    }

    pub fn from_mermaid_id(&self) -> &str {
        &self.from_mermaid_id
    }

    pub fn to_mermaid_id(&self) -> &str {
        &self.to_mermaid_id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasGroup {
    source_id: NodeId,
    mermaid_id: String,
    label: String,
    bounds: BoundingBox,
    members: Vec<String>,
    parent: Option<String>,
}

impl CanvasGroup {
    pub fn new(
        source_id: NodeId,
        mermaid_id: impl Into<String>,
        label: impl Into<String>,
        bounds: BoundingBox,
    ) -> Self {
        Self {
            source_id,
            mermaid_id: mermaid_id.into(),
            label: label.into(),
            bounds,
            members: Vec::new(),
            parent: None,
        }
    }

    pub fn set_members(&mut self, members: Vec<String>) {
        self.members = members;
    }

    pub fn set_parent<T: Into<String>>(&mut self, parent: Option<T>) {
        self.parent = parent.map(Into::into);
    }

    pub fn source_id(&self) -> &NodeId {
        &self.source_id
    }

    pub fn mermaid_id(&self) -> &str {
        &self.mermaid_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Flowchart ids of the non-group nodes assigned to this group, in source order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Flowchart id of the immediate parent group, if nested.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasGraph {
    nodes: Vec<CanvasNode>,
    edges: Vec<CanvasEdge>,
    groups: Vec<CanvasGroup>,
}

impl CanvasGraph {
    pub fn new(nodes: Vec<CanvasNode>, edges: Vec<CanvasEdge>, groups: Vec<CanvasGroup>) -> Self {
        Self {
            nodes,
            edges,
            groups,
        }
    }

    /// Non-group nodes in source order.
    pub fn nodes(&self) -> &[CanvasNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[CanvasEdge] {
        &self.edges
    }

    pub fn groups(&self) -> &[CanvasGroup] {
        &self.groups
    }

    pub fn node_by_mermaid_id(&self, mermaid_id: &str) -> Option<&CanvasNode> {
        self.nodes.iter().find(|node| node.mermaid_id() == mermaid_id)
    }

    pub fn group_by_mermaid_id(&self, mermaid_id: &str) -> Option<&CanvasGroup> {
        self.groups.iter().find(|group| group.mermaid_id() == mermaid_id)
    }

    /// Groups whose immediate parent is `mermaid_id`, in declaration order.
    pub fn child_groups<'a>(&'a self, mermaid_id: &'a str) -> impl Iterator<Item = &'a CanvasGroup> {
        self.groups.iter().filter(move |group| group.parent() == Some(mermaid_id))
    }
}
