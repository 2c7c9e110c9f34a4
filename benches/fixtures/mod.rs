// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use canvas_mermaid::format::callout::MermaidEmbedding;
use canvas_mermaid::model::{RawCanvas, RawEdge, RawNode};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    MediumGrouped,
    LargeLongLabels,
}

#[derive(Debug, Clone, Copy)]
pub struct GridParams {
    pub columns: usize,
    pub rows: usize,
    /// Groups are vertical bands of `columns / group_bands` columns each.
    pub group_bands: usize,
    pub label_lines: usize,
}

impl GridParams {
    pub const fn new(columns: usize, rows: usize, group_bands: usize, label_lines: usize) -> Self {
        Self {
            columns,
            rows,
            group_bands,
            label_lines,
        }
    }
}

pub fn fixture(case: Case) -> RawCanvas {
    match case {
        Case::Small => grid(GridParams::new(4, 3, 0, 1)),
        Case::MediumGrouped => grid(GridParams::new(20, 10, 5, 1)),
        Case::LargeLongLabels => grid(GridParams::new(40, 50, 8, 4)),
    }
}

const CELL: f64 = 300.0;
const NODE_SIZE: f64 = 200.0;

/// A `columns x rows` grid of text nodes. Each node links to its right and lower neighbour;
/// every tenth node is a file node.
pub fn grid(params: GridParams) -> RawCanvas {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    if params.group_bands > 0 {
        let band_width = params.columns.div_ceil(params.group_bands);
        for band in 0..params.group_bands {
            let x = (band * band_width) as f64 * CELL - 20.0;
            nodes.push(
                RawNode::group(&format!("band-{band}"), &format!("Band {band}")).at(
                    x,
                    -20.0,
                    band_width as f64 * CELL,
                    params.rows as f64 * CELL + 40.0,
                ),
            );
        }
    }

    let id = |col: usize, row: usize| format!("node-{col}.{row}");
    for row in 0..params.rows {
        for col in 0..params.columns {
            let index = row * params.columns + col;
            let node = if index % 10 == 9 {
                RawNode::file(&id(col, row), &format!("notes/topic {index}.md"))
            } else {
                let text = (0..params.label_lines)
                    .map(|line| format!("Node {index} line {line}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                RawNode::text(&id(col, row), &text)
            };
            nodes.push(node.at(col as f64 * CELL, row as f64 * CELL, NODE_SIZE, NODE_SIZE));

            if col + 1 < params.columns {
                let edge = RawEdge::new(&format!("e-{index}-r"), &id(col, row), &id(col + 1, row));
                edges.push(if index % 3 == 0 { edge.with_label("next") } else { edge });
            }
            if row + 1 < params.rows {
                edges.push(RawEdge::new(&format!("e-{index}-d"), &id(col, row), &id(col, row + 1)));
            }
        }
    }

    RawCanvas {
        nodes,
        edges,
        groups: Vec::new(),
    }
}

/// Markdown prose with `sections` paragraphs and the embedding placed halfway through.
pub fn document_with_embedding(embedding: &MermaidEmbedding, sections: usize) -> String {
    let mut out = String::new();
    for section in 0..sections {
        if section == sections / 2 {
            out.push_str(embedding.full_content());
            out.push('\n');
        }
        out.push_str(&format!(
            "## Section {section}\n\nSome prose that mentions [[Other.canvas]] and > quotes.\n\n"
        ));
    }
    out
}
