// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Converts JSON Canvas diagrams into Mermaid flowcharts and keeps the flowchart callouts
//! embedded in Markdown documents in sync with the canvas.
//!
//! Pipeline: [`model::RawCanvas`] -> [`graph::build_graph`] -> [`format::mermaid::export_flowchart`]
//! -> [`format::callout::format_embedding`] -> [`patch::patch_document`]. The [`ops`] module wraps
//! it into result values, [`store`] provides the file-system and clipboard collaborators.

pub mod cli;
pub mod config;
pub mod format;
pub mod graph;
pub mod model;
pub mod ops;
pub mod patch;
pub mod store;
