// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::canvas::{RawCanvas, RawEdge, RawNode};

/// Two text nodes `A("Hello") -> B("World")` joined by an edge labeled `next`.
pub(crate) fn two_node_canvas() -> RawCanvas {
    RawCanvas {
        nodes: vec![
            RawNode::text("A", "Hello").at(0.0, 0.0, 200.0, 60.0),
            RawNode::text("B", "World").at(0.0, 200.0, 200.0, 60.0),
        ],
        edges: vec![RawEdge::new("e1", "A", "B").with_label("next")],
        groups: Vec::new(),
    }
}

/// `inner` (declared first) sits inside `outer`; `deep` is inside both, `shallow` only in `outer`.
pub(crate) fn nested_group_canvas() -> RawCanvas {
    RawCanvas {
        nodes: vec![
            RawNode::group("inner", "Inner").at(100.0, 100.0, 300.0, 300.0),
            RawNode::group("outer", "Outer").at(0.0, 0.0, 1000.0, 1000.0),
            RawNode::text("deep", "Deep").at(150.0, 150.0, 50.0, 50.0),
            RawNode::text("shallow", "Shallow").at(600.0, 600.0, 50.0, 50.0),
            RawNode::text("outside", "Outside").at(2000.0, 2000.0, 50.0, 50.0),
        ],
        edges: vec![
            RawEdge::new("e1", "deep", "shallow"),
            RawEdge::new("e2", "shallow", "outside"),
        ],
        groups: Vec::new(),
    }
}

/// A text node linked to two file nodes, one of which lives in a folder.
pub(crate) fn file_node_canvas() -> RawCanvas {
    RawCanvas {
        nodes: vec![
            RawNode::text("t-1", "Index").at(0.0, 0.0, 100.0, 50.0),
            RawNode::file("f-1", "notes/Project Plan.md").at(200.0, 0.0, 100.0, 50.0),
            RawNode::file("f-2", "README.md").at(400.0, 0.0, 100.0, 50.0),
        ],
        edges: vec![RawEdge::new("e-1", "t-1", "f-1"), RawEdge::new("e-2", "t-1", "f-2")],
        groups: Vec::new(),
    }
}
