// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text formats produced from a canvas graph.
//!
//! [`mermaid`] renders the flowchart itself; [`callout`] wraps it into the quote callout that
//! Markdown documents embed.

pub mod callout;
pub mod mermaid;

pub use callout::{format_embedding, MermaidEmbedding};
