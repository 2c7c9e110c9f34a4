// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info, warn};

use super::{
    ConversionResult, ConversionStatistics, ConvertError, CopyError, DocumentOutcome,
    DocumentReport, RefreshError, RefreshReport,
};
use crate::config::ConversionConfig;
use crate::format::callout::MermaidEmbedding;
use crate::format::mermaid::export_flowchart;
use crate::graph::build_graph;
use crate::model::canvas::RawCanvas;
use crate::patch::{patch_document, EmbeddingMatcher, PatchKind};
use crate::store::{ClipboardSink, DocumentStore};

/// Converts `raw` into an embedding titled `[[reference_name]]`.
///
/// Never panics: internal faults are caught and reported as [`ConvertError::Internal`].
pub fn convert_canvas(
    raw: &RawCanvas,
    reference_name: &str,
    config: &ConversionConfig,
) -> ConversionResult {
    guarded_conversion(raw, reference_name, || {
        convert_inner(raw, reference_name, config)
    })
}

/// Runs `convert` with panics turned into [`ConvertError::Internal`] and wraps the outcome with
/// statistics about `raw`.
pub(super) fn guarded_conversion<F>(
    raw: &RawCanvas,
    reference_name: &str,
    convert: F,
) -> ConversionResult
where
    F: FnOnce() -> Result<MermaidEmbedding, ConvertError>,
{
    let started = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(convert))
        .unwrap_or_else(|payload| Err(ConvertError::Internal(panic_message(payload.as_ref()))));

    let statistics = ConversionStatistics {
        nodes_count: raw.nodes.iter().filter(|node| !node.is_group()).count(),
        edges_count: raw.edges.len(),
        groups_count: raw.group_count(),
        processing_time: started.elapsed(),
    };
    let result = ConversionResult::new(outcome, statistics);

    match result.error() {
        None => info!(
            reference = reference_name,
            nodes = statistics.nodes_count,
            edges = statistics.edges_count,
            groups = statistics.groups_count;
            "converted canvas"
        ),
        Some(err) => warn!(
            reference = reference_name,
            error = err.to_string();
            "canvas conversion failed"
        ),
    }
    result
}

fn convert_inner(
    raw: &RawCanvas,
    reference_name: &str,
    config: &ConversionConfig,
) -> Result<MermaidEmbedding, ConvertError> {
    if reference_name.trim().is_empty() {
        return Err(ConvertError::EmptyReferenceName);
    }
    let graph = build_graph(raw)?;
    let flowchart = export_flowchart(&graph, config)?;
    Ok(MermaidEmbedding::new(reference_name, flowchart))
}

pub(super) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}

/// Converts `raw` and patches every document in `store` that already embeds a callout for
/// `[[reference_name]]`.
///
/// Documents that only link the diagram are left alone; use [`refresh_documents`] to append an
/// embedding to chosen documents. Conversion and discovery failures abort before any document is
/// touched. After that, each document is handled independently and its outcome recorded in the
/// report.
pub fn refresh_embeddings(
    store: &dyn DocumentStore,
    raw: &RawCanvas,
    reference_name: &str,
    config: &ConversionConfig,
    matcher: &dyn EmbeddingMatcher,
) -> Result<RefreshReport, RefreshError> {
    let embedding = convert_canvas(raw, reference_name, config).into_embedding()?;

    let linking = store
        .locate_by_reference(reference_name)
        .map_err(|source| RefreshError::Locate {
            reference_name: reference_name.to_owned(),
            source,
        })?;
    let paths = embedding_documents(store, &linking, reference_name, matcher);
    if paths.is_empty() {
        return Err(RefreshError::NoEmbeddingDocuments {
            reference_name: reference_name.to_owned(),
        });
    }

    Ok(refresh_documents(store, &embedding, &paths, matcher))
}

/// The subset of `paths` holding at least one callout for `reference_name`. Documents that cannot
/// be read or scanned are logged and skipped.
fn embedding_documents(
    store: &dyn DocumentStore,
    paths: &[PathBuf],
    reference_name: &str,
    matcher: &dyn EmbeddingMatcher,
) -> Vec<PathBuf> {
    let mut embedding = Vec::new();
    for path in paths {
        let blocks = store
            .read(path)
            .map_err(|err| err.to_string())
            .and_then(|contents| {
                matcher
                    .find_blocks(&contents, reference_name)
                    .map_err(|err| err.to_string())
            });
        match blocks {
            Ok(blocks) if !blocks.is_empty() => embedding.push(path.clone()),
            Ok(_) => {
                debug!(
                    path = path.display().to_string();
                    "document links the diagram without a callout"
                );
            }
            Err(err) => {
                warn!(
                    path = path.display().to_string(),
                    error = err.as_str();
                    "skipping document that cannot be scanned"
                );
            }
        }
    }
    embedding
}

/// Patches `embedding` into each of `paths`, in order.
pub fn refresh_documents(
    store: &dyn DocumentStore,
    embedding: &MermaidEmbedding,
    paths: &[PathBuf],
    matcher: &dyn EmbeddingMatcher,
) -> RefreshReport {
    let documents = paths
        .iter()
        .map(|path| {
            let outcome = refresh_document(store, embedding, path, matcher);
            match &outcome {
                DocumentOutcome::Failed(message) => {
                    warn!(
                        path = path.display().to_string(),
                        error = message.as_str();
                        "document refresh failed"
                    );
                }
                outcome => {
                    debug!(
                        path = path.display().to_string(),
                        outcome = outcome.to_string();
                        "document refreshed"
                    );
                }
            }
            DocumentReport {
                path: path.clone(),
                outcome,
            }
        })
        .collect();

    let report = RefreshReport::new(embedding.reference_name(), documents);
    info!(
        reference = report.reference_name(),
        written = report.written_count(),
        failed = report.failed_count();
        "refresh finished"
    );
    report
}

fn refresh_document(
    store: &dyn DocumentStore,
    embedding: &MermaidEmbedding,
    path: &Path,
    matcher: &dyn EmbeddingMatcher,
) -> DocumentOutcome {
    let contents = match store.read(path) {
        Ok(contents) => contents,
        Err(err) => return DocumentOutcome::Failed(err.to_string()),
    };
    let patched = match patch_document(&contents, embedding, matcher) {
        Ok(patched) => patched,
        Err(err) => return DocumentOutcome::Failed(err.to_string()),
    };
    if !patched.changed() {
        return DocumentOutcome::Skipped;
    }

    let kind = patched.kind();
    if let Err(err) = store.write(path, patched.document()) {
        return DocumentOutcome::Failed(err.to_string());
    }
    match kind {
        PatchKind::Replaced { count } => DocumentOutcome::Updated { replaced: count },
        PatchKind::Appended => DocumentOutcome::Appended,
    }
}

/// Puts the embedding of a successful conversion on the clipboard.
pub fn copy_to_clipboard(
    result: &ConversionResult,
    sink: &dyn ClipboardSink,
) -> Result<(), CopyError> {
    let embedding = match &result.outcome {
        Ok(embedding) => embedding,
        Err(err) => return Err(CopyError::Conversion(err.clone())),
    };
    sink.write(embedding.full_content())?;
    info!(
        reference = embedding.reference_name(),
        bytes = embedding.full_content().len();
        "copied embedding to clipboard"
    );
    Ok(())
}
