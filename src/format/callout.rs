// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Quote-callout container for an exported flowchart.
//!
//! ```text
//! > [!quote] [[Plan.canvas]]
//! > 
//! > ```mermaid
//! > flowchart TB
//! > ...
//! > ```
//! ```

pub const CALLOUT_TYPE: &str = "quote";
pub const CODE_FENCE: &str = "```";
pub const MERMAID_LANGUAGE: &str = "mermaid";

const QUOTE_PREFIX: &str = "> ";

/// Flowchart text wrapped for one diagram reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MermaidEmbedding {
    reference_name: String,
    flowchart: String,
    full_content: String,
}

impl MermaidEmbedding {
    pub fn new(reference_name: impl Into<String>, flowchart: impl Into<String>) -> Self {
        let reference_name = reference_name.into();
        let flowchart = flowchart.into();
        let full_content = format_embedding(&reference_name, &flowchart);
        Self {
            reference_name,
            flowchart,
            full_content,
        }
    }

    pub fn reference_name(&self) -> &str {
        &self.reference_name
    }

    pub fn flowchart(&self) -> &str {
        &self.flowchart
    }

    pub fn full_content(&self) -> &str {
        &self.full_content
    }

    pub fn into_full_content(self) -> String {
        self.full_content
    }
}

/// The callout title line, e.g. `> [!quote] [[Plan.canvas]]`.
pub fn callout_title(reference_name: &str) -> String {
    format!("{QUOTE_PREFIX}[!{CALLOUT_TYPE}] [[{reference_name}]]")
}

/// Wraps `flowchart` in a quote callout titled by `reference_name`.
///
/// Every flowchart line gets the `> ` quote prefix, blank lines included, so the block stays one
/// contiguous callout. The result always ends with a newline.
pub fn format_embedding(reference_name: &str, flowchart: &str) -> String {
    let mut out = String::with_capacity(flowchart.len() + reference_name.len() + 64);
    out.push_str(&callout_title(reference_name));
    out.push('\n');
    out.push_str(QUOTE_PREFIX);
    out.push('\n');
    out.push_str(QUOTE_PREFIX);
    out.push_str(CODE_FENCE);
    out.push_str(MERMAID_LANGUAGE);
    out.push('\n');
    for line in flowchart.lines() {
        out.push_str(QUOTE_PREFIX);
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(QUOTE_PREFIX);
    out.push_str(CODE_FENCE);
    out.push('\n');
    out
}
