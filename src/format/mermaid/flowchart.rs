// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canonical graph -> Mermaid flowchart text.
//!
//! Output sections always appear in this order: direction header, node definitions, group
//! structure, edge connections, then annotations (styles and the internal-link class). Each
//! section is introduced by a `%%` comment; empty sections other than node definitions are
//! omitted. Everything is emitted in source order, so identical input yields identical text.
//!
//! Only non-group nodes get a node declaration line. Canvas nodes of type `group` become
//! `subgraph` blocks instead, so a graph built from N canvas nodes of which G are groups yields
//! N - G declarations.

use std::borrow::Cow;
use std::collections::BTreeSet;

use thiserror::Error;

use super::ident::validate_mermaid_ident;
pub use super::ident::MermaidIdentError;

use crate::config::ConversionConfig;
use crate::model::graph::{CanvasGraph, CanvasGroup, CanvasNode, EdgeStyle, LineStyle, NodeStyle};

pub const FLOWCHART_KEYWORD: &str = "flowchart";
pub const DEFAULT_NODE_STYLE: &str = "fill:#f9f9f9,stroke:#333,stroke-width:2px";
pub const DEFAULT_EDGE_STYLE: &str = "stroke:#333,stroke-width:2px";
pub const INTERNAL_LINK_CLASS: &str = "internal-link";

pub const SECTION_NODE_DEFINITIONS: &str = "%% Node Definitions";
pub const SECTION_GROUP_STRUCTURE: &str = "%% Group Structure";
pub const SECTION_EDGE_CONNECTIONS: &str = "%% Edge Connections";
pub const SECTION_STYLES: &str = "%% Styles";
pub const SECTION_INTERNAL_LINKS: &str = "%% File Node Internal Links";

const LABEL_LINE_BREAK: &str = "<br>";
const INDENT: &str = "  ";
const MEMBER_INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MermaidFlowchartExportError {
    #[error("cannot export node id as Mermaid identifier: {mermaid_id:?} ({reason})")]
    InvalidNodeId {
        mermaid_id: String,
        reason: MermaidIdentError,
    },
    #[error("cannot export group id as Mermaid identifier: {mermaid_id:?} ({reason})")]
    InvalidGroupId {
        mermaid_id: String,
        reason: MermaidIdentError,
    },
    #[error("duplicate flowchart id: {mermaid_id}")]
    DuplicateId { mermaid_id: String },
    #[error("edge {edge_id} references undeclared id: {mermaid_id}")]
    MissingEdgeEndpoint { edge_id: String, mermaid_id: String },
    #[error("group {group_id} lists undeclared member: {mermaid_id}")]
    MissingGroupMember { group_id: String, mermaid_id: String },
    #[error("group {group_id} names undeclared parent group: {parent_id}")]
    MissingParentGroup { group_id: String, parent_id: String },
}

pub fn export_flowchart(
    graph: &CanvasGraph,
    config: &ConversionConfig,
) -> Result<String, MermaidFlowchartExportError> {
    validate_graph(graph)?;

    let mut out = String::new();
    out.push_str(FLOWCHART_KEYWORD);
    out.push(' ');
    out.push_str(config.direction.as_str());
    out.push('\n');

    write_node_definitions(&mut out, graph);
    write_group_structure(&mut out, graph);
    write_edge_connections(&mut out, graph);
    if config.enable_styling {
        write_styles(&mut out, graph);
    }
    if config.enable_internal_links {
        write_internal_links(&mut out, graph);
    }

    Ok(out)
}

fn validate_graph(graph: &CanvasGraph) -> Result<(), MermaidFlowchartExportError> {
    let mut declared = BTreeSet::<&str>::new();
    for node in graph.nodes() {
        let mermaid_id = node.mermaid_id();
        validate_mermaid_ident(mermaid_id).map_err(|reason| {
            MermaidFlowchartExportError::InvalidNodeId {
                mermaid_id: mermaid_id.to_owned(),
                reason,
            }
        })?;
        if !declared.insert(mermaid_id) {
            return Err(MermaidFlowchartExportError::DuplicateId {
                mermaid_id: mermaid_id.to_owned(),
            });
        }
    }

    let mut group_ids = BTreeSet::<&str>::new();
    for group in graph.groups() {
        let mermaid_id = group.mermaid_id();
        validate_mermaid_ident(mermaid_id).map_err(|reason| {
            MermaidFlowchartExportError::InvalidGroupId {
                mermaid_id: mermaid_id.to_owned(),
                reason,
            }
        })?;
        if declared.contains(mermaid_id) || !group_ids.insert(mermaid_id) {
            return Err(MermaidFlowchartExportError::DuplicateId {
                mermaid_id: mermaid_id.to_owned(),
            });
        }
    }

    for group in graph.groups() {
        if let Some(member) = group.members().iter().find(|m| !declared.contains(m.as_str())) {
            return Err(MermaidFlowchartExportError::MissingGroupMember {
                group_id: group.mermaid_id().to_owned(),
                mermaid_id: member.clone(),
            });
        }
        if let Some(parent) = group.parent().filter(|parent| !group_ids.contains(parent)) {
            return Err(MermaidFlowchartExportError::MissingParentGroup {
                group_id: group.mermaid_id().to_owned(),
                parent_id: parent.to_owned(),
            });
        }
    }

    // Edges may point at groups: Mermaid links subgraph ids like node ids.
    for edge in graph.edges() {
        for endpoint in [edge.from_mermaid_id(), edge.to_mermaid_id()] {
            if !declared.contains(endpoint) && !group_ids.contains(endpoint) {
                return Err(MermaidFlowchartExportError::MissingEdgeEndpoint {
                    edge_id: edge.source_id().to_string(),
                    mermaid_id: endpoint.to_owned(),
                });
            }
        }
    }

    Ok(())
}

fn write_section_header(out: &mut String, header: &str) {
    out.push('\n');
    out.push_str(INDENT);
    out.push_str(header);
    out.push('\n');
}

fn write_node_definitions(out: &mut String, graph: &CanvasGraph) {
    write_section_header(out, SECTION_NODE_DEFINITIONS);
    for node in graph.nodes() {
        out.push_str(INDENT);
        out.push_str(node.mermaid_id());
        out.push_str("[\"");
        out.push_str(&display_label(node));
        out.push_str("\"]\n");
    }
}

fn write_group_structure(out: &mut String, graph: &CanvasGraph) {
    if graph.groups().is_empty() {
        return;
    }

    write_section_header(out, SECTION_GROUP_STRUCTURE);

    // Nested groups must be declared before the top-level group that references them.
    for group in graph.groups().iter().filter(|group| group.parent().is_some()) {
        write_subgraph(out, group, &[]);
    }
    for group in graph.groups().iter().filter(|group| group.parent().is_none()) {
        let children = graph
            .child_groups(group.mermaid_id())
            .map(CanvasGroup::mermaid_id)
            .collect::<Vec<_>>();
        write_subgraph(out, group, &children);
    }
}

fn write_subgraph(out: &mut String, group: &CanvasGroup, child_groups: &[&str]) {
    out.push_str(INDENT);
    out.push_str("subgraph ");
    out.push_str(group.mermaid_id());
    out.push_str("[\"");
    out.push_str(&escape_label(&reflow_label(group.label())));
    out.push_str("\"]\n");

    let members = group.members().iter().map(String::as_str);
    for member in members.chain(child_groups.iter().copied()) {
        out.push_str(MEMBER_INDENT);
        out.push_str(member);
        out.push('\n');
    }

    out.push_str(INDENT);
    out.push_str("end\n");
}

fn write_edge_connections(out: &mut String, graph: &CanvasGraph) {
    if graph.edges().is_empty() {
        return;
    }

    write_section_header(out, SECTION_EDGE_CONNECTIONS);
    for edge in graph.edges() {
        out.push_str(INDENT);
        out.push_str(edge.from_mermaid_id());
        out.push_str(" -->");
        if let Some(label) = edge.label().and_then(edge_label) {
            out.push('|');
            out.push_str(&label);
            out.push('|');
        }
        out.push(' ');
        out.push_str(edge.to_mermaid_id());
        out.push('\n');
    }
}

fn write_styles(out: &mut String, graph: &CanvasGraph) {
    let node_styles = graph
        .nodes()
        .iter()
        .filter(|node| !node.style().is_default())
        .map(|node| (node.mermaid_id(), node_style(node.style())))
        .collect::<Vec<_>>();
    let link_styles = graph
        .edges()
        .iter()
        .enumerate()
        .filter(|(_, edge)| !edge.style().is_default())
        .map(|(edge_idx, edge)| (edge_idx, edge_style(edge.style())))
        .collect::<Vec<_>>();

    if node_styles.is_empty() && link_styles.is_empty() {
        return;
    }

    write_section_header(out, SECTION_STYLES);
    for (mermaid_id, style) in node_styles {
        out.push_str(INDENT);
        out.push_str("style ");
        out.push_str(mermaid_id);
        out.push(' ');
        out.push_str(&style);
        out.push('\n');
    }
    // Link indices follow emission order, which is source order.
    for (edge_idx, style) in link_styles {
        out.push_str(INDENT);
        out.push_str("linkStyle ");
        out.push_str(&edge_idx.to_string());
        out.push(' ');
        out.push_str(&style);
        out.push('\n');
    }
}

fn write_internal_links(out: &mut String, graph: &CanvasGraph) {
    let file_node_ids = graph
        .nodes()
        .iter()
        .filter(|node| node.file().is_some_and(|file| !file.trim().is_empty()))
        .map(CanvasNode::mermaid_id)
        .collect::<Vec<_>>();
    if file_node_ids.is_empty() {
        return;
    }

    write_section_header(out, SECTION_INTERNAL_LINKS);
    out.push_str(INDENT);
    out.push_str("class ");
    out.push_str(&file_node_ids.join(","));
    out.push(' ');
    out.push_str(INTERNAL_LINK_CLASS);
    out.push('\n');
}

/// Label shown for a node: text, then label, then the file name without extension, then
/// `Node_<source id>`. Multi-line labels are reflowed and quotes escaped.
pub fn display_label(node: &CanvasNode) -> String {
    let raw = non_blank(node.text())
        .or_else(|| non_blank(node.label()))
        .map(ToOwned::to_owned)
        .or_else(|| node.file().and_then(file_stem_label))
        .unwrap_or_else(|| format!("Node_{}", node.source_id()));
    escape_label(&reflow_label(&raw))
}

/// Keeps the first line as-is and appends every further non-empty line, trimmed, after a
/// `<br>` marker and a two-space indent. Blank lines are dropped. `\r\n` and lone `\r` count as
/// line breaks.
pub fn reflow_label(label: &str) -> String {
    let label = normalize_line_breaks(label);
    let mut lines = label.lines();
    let mut out = lines.next().unwrap_or_default().to_owned();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        out.push_str(LABEL_LINE_BREAK);
        out.push_str(INDENT);
        out.push_str(line);
    }
    out
}

fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}

fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn edge_label(label: &str) -> Option<String> {
    let joined = normalize_line_breaks(label)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(LABEL_LINE_BREAK);
    if joined.is_empty() {
        return None;
    }
    Some(joined.replace('|', "#124;"))
}

/// `notes/Project Plan.md` -> `Project Plan`. Dotfiles keep their full name.
fn file_stem_label(path: &str) -> Option<String> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => &name[..idx],
        _ => name,
    };
    non_blank(Some(stem)).map(ToOwned::to_owned)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

fn node_style(style: &NodeStyle) -> String {
    let mut out = DEFAULT_NODE_STYLE.to_owned();
    if let Some(fill) = &style.background_color {
        out = replace_style_clause(&out, "fill", fill);
    }
    if let Some(stroke) = &style.border_color {
        out = replace_style_clause(&out, "stroke", stroke);
    }
    out
}

fn edge_style(style: &EdgeStyle) -> String {
    let mut out = DEFAULT_EDGE_STYLE.to_owned();
    if let Some(color) = &style.color {
        out = replace_style_clause(&out, "stroke", color);
    }
    if let Some(width) = style.width {
        out = replace_style_clause(&out, "stroke-width", &format!("{width}px"));
    }
    match style.line {
        Some(LineStyle::Dashed) => out = replace_style_clause(&out, "stroke-dasharray", "5 5"),
        Some(LineStyle::Dotted) => out = replace_style_clause(&out, "stroke-dasharray", "2 2"),
        Some(LineStyle::Solid) | None => {}
    }
    out
}

/// Replaces the value of the `key:` clause in a comma-separated style string, leaving every other
/// clause untouched. Appends the clause when the key is absent.
pub fn replace_style_clause(style: &str, key: &str, value: &str) -> String {
    let mut replaced = false;
    let mut clauses = style
        .split(',')
        .filter(|clause| !clause.is_empty())
        .map(|clause| match clause.split_once(':') {
            Some((clause_key, _)) if clause_key.trim() == key => {
                replaced = true;
                format!("{key}:{value}")
            }
            _ => clause.to_owned(),
        })
        .collect::<Vec<_>>();
    if !replaced {
        clauses.push(format!("{key}:{value}"));
    }
    clauses.join(",")
}
