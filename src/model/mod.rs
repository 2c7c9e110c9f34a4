// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Raw canvas records come in, a validated canonical graph goes out to the serializer.

pub mod canvas;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod graph;
pub mod ids;

pub use canvas::{RawCanvas, RawEdge, RawGroup, RawNode};
pub use geometry::BoundingBox;
pub use graph::{
    CanvasEdge, CanvasGraph, CanvasGroup, CanvasNode, EdgeStyle, LineStyle, NodeKind, NodeStyle,
};
pub use ids::{EdgeId, Id, IdError, NodeId};
