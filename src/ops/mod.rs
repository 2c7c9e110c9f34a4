// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Outermost operations: convert a canvas, refresh the documents that embed it, copy the result.
//!
//! Nothing here returns a bare error for a conversion problem: [`convert_canvas`] always yields a
//! [`ConversionResult`] carrying a success flag, a human-readable message and statistics, and
//! document refreshes report one [`DocumentOutcome`] per document.

mod ops_impl;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::format::callout::MermaidEmbedding;
use crate::format::mermaid::MermaidFlowchartExportError;
use crate::graph::ValidationError;
use crate::store::StoreError;

pub use ops_impl::{convert_canvas, copy_to_clipboard, refresh_documents, refresh_embeddings};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("reference name must not be empty")]
    EmptyReferenceName,
    #[error("invalid canvas: {0}")]
    Validation(#[from] ValidationError),
    #[error("cannot export flowchart: {0}")]
    Export(#[from] MermaidFlowchartExportError),
    #[error("internal error during conversion: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStatistics {
    /// Non-group nodes in the input.
    pub nodes_count: usize,
    pub edges_count: usize,
    /// Group nodes plus explicit group records.
    pub groups_count: usize,
    pub processing_time: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    outcome: Result<MermaidEmbedding, ConvertError>,
    statistics: ConversionStatistics,
}

impl ConversionResult {
    pub(crate) fn new(
        outcome: Result<MermaidEmbedding, ConvertError>,
        statistics: ConversionStatistics,
    ) -> Self {
        Self {
            outcome,
            statistics,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn embedding(&self) -> Option<&MermaidEmbedding> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ConvertError> {
        self.outcome.as_ref().err()
    }

    pub fn statistics(&self) -> &ConversionStatistics {
        &self.statistics
    }

    pub fn into_embedding(self) -> Result<MermaidEmbedding, ConvertError> {
        self.outcome
    }

    /// One line suitable for showing to the user.
    pub fn message(&self) -> String {
        match &self.outcome {
            Ok(_) => format!(
                "Converted {} nodes, {} edges and {} groups in {} ms",
                self.statistics.nodes_count,
                self.statistics.edges_count,
                self.statistics.groups_count,
                self.statistics.processing_time.as_millis()
            ),
            Err(err) => format!("Canvas conversion failed: {err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Existing embeddings were rewritten.
    Updated { replaced: usize },
    /// No embedding was present; one was appended.
    Appended,
    /// The document already holds the current embedding.
    Skipped,
    Failed(String),
}

impl DocumentOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Updated { .. } | Self::Appended)
    }
}

impl fmt::Display for DocumentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated { replaced: 1 } => f.write_str("updated"),
            Self::Updated { replaced } => write!(f, "updated ({replaced} embeddings)"),
            Self::Appended => f.write_str("appended"),
            Self::Skipped => f.write_str("unchanged"),
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub outcome: DocumentOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    reference_name: String,
    documents: Vec<DocumentReport>,
}

impl RefreshReport {
    pub(crate) fn new(reference_name: impl Into<String>, documents: Vec<DocumentReport>) -> Self {
        Self {
            reference_name: reference_name.into(),
            documents,
        }
    }

    pub fn reference_name(&self) -> &str {
        &self.reference_name
    }

    pub fn documents(&self) -> &[DocumentReport] {
        &self.documents
    }

    pub fn written_count(&self) -> usize {
        self.documents.iter().filter(|doc| doc.outcome.is_write()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.documents.iter().filter(|doc| doc.outcome.is_failure()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn message(&self) -> String {
        let failed = self.failed_count();
        if failed == 0 {
            format!(
                "Refreshed [[{}]] in {} of {} documents",
                self.reference_name,
                self.written_count(),
                self.documents.len()
            )
        } else {
            format!(
                "Refreshed [[{}]] in {} of {} documents; {failed} failed",
                self.reference_name,
                self.written_count(),
                self.documents.len()
            )
        }
    }
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("cannot convert canvas: {0}")]
    Conversion(#[from] ConvertError),
    #[error("cannot locate documents referencing [[{reference_name}]]: {source}")]
    Locate {
        reference_name: String,
        #[source]
        source: StoreError,
    },
    #[error("no documents embed a callout for [[{reference_name}]]")]
    NoEmbeddingDocuments { reference_name: String },
}

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("nothing to copy: {0}")]
    Conversion(ConvertError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
