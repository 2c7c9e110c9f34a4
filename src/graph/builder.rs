// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Normalizes raw canvas records into a [`CanvasGraph`].

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use thiserror::Error;

use super::containment::{assign_members, resolve_parents};
use crate::format::mermaid::ident::{is_reserved_ident, sanitize_mermaid_ident};
use crate::model::canvas::{RawCanvas, RawEdge, RawGroup, RawNode};
use crate::model::geometry::BoundingBox;
use crate::model::graph::{
    CanvasEdge, CanvasGraph, CanvasGroup, CanvasNode, EdgeStyle, LineStyle, NodeKind, NodeStyle,
};
use crate::model::ids::{EdgeId, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("canvas does not contain any nodes")]
    NoNodes,
    #[error("node #{index} has no id")]
    MissingNodeId { index: usize },
    #[error("group #{index} has no id")]
    MissingGroupId { index: usize },
    #[error("duplicate node id: {node_id}")]
    DuplicateNodeId { node_id: String },
    #[error("edge {edge_id} references unknown node id: {node_id:?}")]
    DanglingEdge { edge_id: String, node_id: String },
}

/// Validates `raw` and builds the canonical graph.
///
/// Nothing is produced unless the whole input validates. Flowchart ids are allocated in source
/// order (nodes first, then explicit groups); when two ids sanitize to the same token the later
/// one gets a `_2`, `_3`, ... suffix.
pub fn build_graph(raw: &RawCanvas) -> Result<CanvasGraph, ValidationError> {
    if raw.nodes.is_empty() {
        return Err(ValidationError::NoNodes);
    }

    let mut seen = BTreeSet::<NodeId>::new();
    let mut node_ids = Vec::with_capacity(raw.nodes.len());
    for (index, node) in raw.nodes.iter().enumerate() {
        let node_id = node
            .id
            .as_deref()
            .and_then(|id| NodeId::new(id).ok())
            .ok_or(ValidationError::MissingNodeId { index })?;
        if !seen.insert(node_id.clone()) {
            return Err(ValidationError::DuplicateNodeId {
                node_id: node_id.into_string(),
            });
        }
        node_ids.push(node_id);
    }

    let mut group_ids = Vec::with_capacity(raw.groups.len());
    for (index, group) in raw.groups.iter().enumerate() {
        let group_id = group
            .id
            .as_deref()
            .and_then(|id| NodeId::new(id).ok())
            .ok_or(ValidationError::MissingGroupId { index })?;
        if !seen.insert(group_id.clone()) {
            return Err(ValidationError::DuplicateNodeId {
                node_id: group_id.into_string(),
            });
        }
        group_ids.push(group_id);
    }

    let edge_ids = raw
        .edges
        .iter()
        .enumerate()
        .map(|(index, edge)| validate_edge(index, edge, &seen))
        .collect::<Result<Vec<_>, _>>()?;

    let mut allocator = IdAllocator::default();
    let mut mermaid_ids = BTreeMap::<NodeId, String>::new();
    for id in node_ids.iter().chain(group_ids.iter()) {
        let mermaid_id = allocator.allocate(id.as_str());
        trace!(source_id = id.as_str(), mermaid_id = mermaid_id.as_str(); "allocated flowchart id");
        mermaid_ids.insert(id.clone(), mermaid_id);
    }
    let mermaid_id_of = |id: &NodeId| mermaid_ids.get(id).cloned().unwrap_or_default();

    let mut nodes = Vec::new();
    let mut groups = Vec::new();
    for (raw_node, node_id) in raw.nodes.iter().zip(&node_ids) {
        let mermaid_id = mermaid_id_of(node_id);
        if raw_node.is_group() {
            groups.push(group_from_node(raw_node, node_id, mermaid_id));
        } else {
            nodes.push(canonical_node(raw_node, node_id, mermaid_id));
        }
    }
    for (raw_group, group_id) in raw.groups.iter().zip(&group_ids) {
        groups.push(group_from_record(raw_group, group_id, mermaid_id_of(group_id)));
    }

    resolve_group_structure(&nodes, &mut groups);

    let edges = raw
        .edges
        .iter()
        .zip(edge_ids)
        .map(|(raw_edge, edge_id)| canonical_edge(raw_edge, edge_id, &mermaid_ids))
        .collect::<Vec<_>>();

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        groups = groups.len();
        "built canvas graph"
    );

    Ok(CanvasGraph::new(nodes, edges, groups))
}

fn validate_edge(
    index: usize,
    edge: &RawEdge,
    node_ids: &BTreeSet<NodeId>,
) -> Result<EdgeId, ValidationError> {
    let edge_id = edge
        .id
        .as_deref()
        .and_then(|id| EdgeId::new(id).ok())
        .or_else(|| EdgeId::new(format!("edge-{index}")).ok())
        .ok_or_else(|| ValidationError::DanglingEdge {
            edge_id: format!("#{index}"),
            node_id: String::new(),
        })?;

    for endpoint in [edge.from_node.as_deref(), edge.to_node.as_deref()] {
        let endpoint = endpoint.unwrap_or_default();
        if !node_ids.contains(endpoint) {
            return Err(ValidationError::DanglingEdge {
                edge_id: edge_id.into_string(),
                node_id: endpoint.to_owned(),
            });
        }
    }

    Ok(edge_id)
}

#[derive(Debug, Default)]
struct IdAllocator {
    taken: BTreeSet<String>,
}

impl IdAllocator {
    fn allocate(&mut self, raw: &str) -> String {
        let base = sanitize_mermaid_ident(raw);
        if !is_reserved_ident(&base) && self.taken.insert(base.clone()) {
            return base;
        }

        let mut suffix = 2_u64;
        loop {
            let candidate = format!("{base}_{suffix}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            suffix = suffix.saturating_add(1);
        }
    }
}

fn canonical_node(raw: &RawNode, node_id: &NodeId, mermaid_id: String) -> CanvasNode {
    let kind = NodeKind::classify(raw.kind.as_deref(), raw.file.as_deref(), raw.url.as_deref());
    let style = NodeStyle {
        background_color: raw.background_color.as_deref().map(resolve_canvas_color),
        border_color: raw
            .border_color
            .as_deref()
            .or(raw.color.as_deref())
            .map(resolve_canvas_color),
    };

    CanvasNode::new(node_id.clone(), mermaid_id, kind)
        .with_text(raw.text.clone())
        .with_label(raw.label.clone())
        .with_file(raw.file.clone())
        .with_url(raw.url.clone())
        .with_bounds(raw.bounds())
        .with_style(style)
}

fn group_from_node(raw: &RawNode, node_id: &NodeId, mermaid_id: String) -> CanvasGroup {
    let label = non_blank(raw.label.as_deref())
        .or_else(|| non_blank(raw.text.as_deref()))
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| format!("Group_{node_id}"));
    CanvasGroup::new(node_id.clone(), mermaid_id, label, raw.bounds())
}

fn group_from_record(raw: &RawGroup, group_id: &NodeId, mermaid_id: String) -> CanvasGroup {
    let label = non_blank(raw.label.as_deref())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| format!("Group_{group_id}"));
    CanvasGroup::new(group_id.clone(), mermaid_id, label, raw.bounds())
}

fn resolve_group_structure(nodes: &[CanvasNode], groups: &mut [CanvasGroup]) {
    if groups.is_empty() {
        return;
    }

    let group_boxes = groups.iter().map(|group| *group.bounds()).collect::<Vec<BoundingBox>>();
    let node_boxes = nodes.iter().map(|node| *node.bounds()).collect::<Vec<BoundingBox>>();

    let mut members = vec![Vec::<String>::new(); groups.len()];
    for (node, group_idx) in nodes.iter().zip(assign_members(&node_boxes, &group_boxes)) {
        if let Some(group_idx) = group_idx {
            members[group_idx].push(node.mermaid_id().to_owned());
        }
    }

    let parent_ids = resolve_parents(&group_boxes)
        .into_iter()
        .map(|parent| parent.map(|idx| groups[idx].mermaid_id().to_owned()))
        .collect::<Vec<_>>();

    for ((group, members), parent) in groups.iter_mut().zip(members).zip(parent_ids) {
        group.set_members(members);
        group.set_parent(parent);
    }
}

fn canonical_edge(
    raw: &RawEdge,
    edge_id: EdgeId,
    mermaid_ids: &BTreeMap<NodeId, String>,
) -> CanvasEdge {
    let endpoint = |id: Option<&str>| {
        id.and_then(|id| mermaid_ids.get(id))
            .cloned()
            .unwrap_or_default()
    };
    let style = EdgeStyle {
        color: raw.color.as_deref().map(resolve_canvas_color),
        width: raw.width,
        line: raw.style.as_deref().and_then(LineStyle::parse),
        arrow: raw.to_end.clone(),
    };

    CanvasEdge::new(
        edge_id,
        endpoint(raw.from_node.as_deref()),
        endpoint(raw.to_node.as_deref()),
    )
    .with_label(raw.label.clone())
    .with_style(style)
}

/// Resolves JSON Canvas preset colors (`"1"`..`"6"`) to hex; other values pass through.
fn resolve_canvas_color(raw: &str) -> String {
    match raw.trim() {
        "1" => "#fb464c",
        "2" => "#e9973f",
        "3" => "#e0de71",
        "4" => "#44cf6e",
        "5" => "#53dfdd",
        "6" => "#a882ff",
        other => other,
    }
    .to_owned()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
