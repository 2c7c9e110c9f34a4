// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid flowchart export.

pub mod flowchart;
pub mod ident;

pub use flowchart::{export_flowchart, MermaidFlowchartExportError};
pub use ident::{sanitize_mermaid_ident, validate_mermaid_ident, MermaidIdentError};
