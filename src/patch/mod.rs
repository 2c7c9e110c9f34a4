// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Locates embedded flowchart callouts in Markdown text and replaces or appends them.
//!
//! Matching is isolated behind [`EmbeddingMatcher`]: callers only ask for the byte ranges of the
//! blocks that reference a diagram, so the regex matcher and the line scanner are
//! interchangeable.
//!
//! A block is recognized by its structure:
//!
//! ```text
//! > [!quote] [[<reference name>]]
//! >
//! > ```mermaid
//! > ...quoted lines...
//! > ```
//! ```
//!
//! The range of a block covers the closing fence line including its line break.

mod regex_matcher;
mod scanner;


use std::ops::Range;

use log::debug;
use thiserror::Error;

use crate::format::callout::MermaidEmbedding;

pub use regex_matcher::RegexMatcher;
pub use scanner::LineScanner;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("cannot build embedding pattern for {reference_name:?}: {source}")]
    Pattern {
        reference_name: String,
        #[source]
        source: regex::Error,
    },
}

pub trait EmbeddingMatcher {
    /// Byte ranges of every embedding block titled `[[reference_name]]`, in document order and
    /// non-overlapping.
    fn find_blocks(
        &self,
        document: &str,
        reference_name: &str,
    ) -> Result<Vec<Range<usize>>, PatchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchKind {
    Replaced { count: usize },
    Appended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    document: String,
    kind: PatchKind,
    changed: bool,
}

impl PatchOutcome {
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn into_document(self) -> String {
        self.document
    }

    pub fn kind(&self) -> PatchKind {
        self.kind
    }

    /// False when the patched text is byte-identical to the input.
    pub fn changed(&self) -> bool {
        self.changed
    }
}

/// Replaces every block referencing `embedding`'s diagram with its current content, or appends
/// the embedding after one blank line when the document has none.
///
/// Text outside the matched blocks is preserved byte for byte. Patching an already patched
/// document with the same embedding returns it unchanged.
pub fn patch_document(
    document: &str,
    embedding: &MermaidEmbedding,
    matcher: &dyn EmbeddingMatcher,
) -> Result<PatchOutcome, PatchError> {
    let blocks = matcher.find_blocks(document, embedding.reference_name())?;
    let replacement = embedding.full_content();

    let (patched, kind) = if blocks.is_empty() {
        (append_embedding(document, replacement), PatchKind::Appended)
    } else {
        let mut patched = String::with_capacity(document.len() + replacement.len());
        let mut cursor = 0;
        for block in &blocks {
            patched.push_str(&document[cursor..block.start]);
            patched.push_str(replacement);
            cursor = block.end;
        }
        patched.push_str(&document[cursor..]);
        (patched, PatchKind::Replaced { count: blocks.len() })
    };

    let changed = patched != document;
    debug!(
        reference = embedding.reference_name(),
        blocks = blocks.len(),
        changed = changed;
        "patched document"
    );
    Ok(PatchOutcome {
        document: patched,
        kind,
        changed,
    })
}

fn append_embedding(document: &str, embedding: &str) -> String {
    let body = document.trim_end_matches(['\n', '\r']);
    if body.trim().is_empty() {
        return embedding.to_owned();
    }

    let mut out = String::with_capacity(body.len() + embedding.len() + 2);
    out.push_str(body);
    out.push_str("\n\n");
    out.push_str(embedding);
    out
}

/// Whether `document` links to `reference_name` anywhere (`[[reference_name]]`).
pub fn references_diagram(document: &str, reference_name: &str) -> bool {
    document.contains(&format!("[[{reference_name}]]"))
}
