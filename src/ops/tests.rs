// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::PathBuf;

use rstest::{fixture, rstest};

use super::ops_impl::{guarded_conversion, panic_message};
use super::{
    convert_canvas, copy_to_clipboard, refresh_documents, refresh_embeddings, ConvertError,
    CopyError, DocumentOutcome, RefreshError,
};
use crate::config::{ConversionConfig, Direction};
use crate::format::callout::MermaidEmbedding;
use crate::graph::ValidationError;
use crate::model::canvas::{RawCanvas, RawEdge};
use crate::model::fixtures;
use crate::patch::{EmbeddingMatcher, LineScanner, RegexMatcher};
use crate::store::{ClipboardSink, MemoryClipboard, MemoryDocumentStore};

const NAME: &str = "Plan.canvas";

fn stale_embedding() -> String {
    MermaidEmbedding::new(NAME, "flowchart LR\n  Old[\"Old\"]\n").into_full_content()
}

#[fixture]
fn vault() -> MemoryDocumentStore {
    MemoryDocumentStore::new()
        .with_document("embedded.md", format!("# Plan\n\n{}\nFooter\n", stale_embedding()))
        .with_document("linked.md", "Working on [[Plan.canvas]] today.\n")
        .with_document("notes/second.md", format!("{}\nSecond copy.\n", stale_embedding()))
        .with_document("unrelated.md", "Nothing to see.\n")
}

#[test]
fn converts_two_node_canvas_with_statistics() {
    let result = convert_canvas(&fixtures::two_node_canvas(), NAME, &ConversionConfig::default());

    assert!(result.is_success());
    let embedding = result.embedding().unwrap();
    assert_eq!(embedding.reference_name(), NAME);
    assert!(embedding.flowchart().starts_with("flowchart TB\n"));
    assert!(embedding.flowchart().contains("  A[\"Hello\"]\n"));
    assert!(embedding.flowchart().contains("  B[\"World\"]\n"));
    assert!(embedding.flowchart().contains("  A -->|next| B\n"));
    assert!(embedding.full_content().starts_with("> [!quote] [[Plan.canvas]]\n"));

    let stats = result.statistics();
    assert_eq!((stats.nodes_count, stats.edges_count, stats.groups_count), (2, 1, 0));
    assert!(result.message().starts_with("Converted 2 nodes, 1 edges and 0 groups in "));
}

#[test]
fn group_nodes_are_counted_as_groups() {
    let result = convert_canvas(&fixtures::nested_group_canvas(), NAME, &ConversionConfig::default());

    let stats = result.statistics();
    assert_eq!((stats.nodes_count, stats.edges_count, stats.groups_count), (3, 2, 2));
}

#[test]
fn config_flows_into_the_flowchart() {
    let config = ConversionConfig::default().with_direction(Direction::LeftToRight);
    let result = convert_canvas(&fixtures::two_node_canvas(), NAME, &config);

    assert!(result.embedding().unwrap().flowchart().starts_with("flowchart LR\n"));
}

#[test]
fn empty_canvas_is_a_failure_result_without_output() {
    let result = convert_canvas(&RawCanvas::default(), NAME, &ConversionConfig::default());

    assert!(!result.is_success());
    assert!(result.embedding().is_none());
    assert_eq!(result.error(), Some(&ConvertError::Validation(ValidationError::NoNodes)));
    assert_eq!(
        result.message(),
        "Canvas conversion failed: invalid canvas: canvas does not contain any nodes"
    );
}

#[test]
fn dangling_edge_is_a_validation_failure() {
    let mut raw = fixtures::two_node_canvas();
    raw.edges.push(RawEdge::new("e2", "A", "missing"));

    let result = convert_canvas(&raw, NAME, &ConversionConfig::default());

    assert_eq!(
        result.error(),
        Some(&ConvertError::Validation(ValidationError::DanglingEdge {
            edge_id: "e2".to_owned(),
            node_id: "missing".to_owned(),
        }))
    );
}

#[test]
fn blank_reference_name_is_rejected() {
    let result = convert_canvas(&fixtures::two_node_canvas(), "  ", &ConversionConfig::default());
    assert_eq!(result.error(), Some(&ConvertError::EmptyReferenceName));
}

#[rstest]
#[case::regex(&RegexMatcher)]
#[case::scanner(&LineScanner)]
fn refresh_updates_existing_callouts_then_settles(
    vault: MemoryDocumentStore,
    #[case] matcher: &dyn EmbeddingMatcher,
) {
    let raw = fixtures::two_node_canvas();
    let config = ConversionConfig::default();
    let expected = convert_canvas(&raw, NAME, &config).into_embedding().unwrap();

    let report = refresh_embeddings(&vault, &raw, NAME, &config, matcher).unwrap();

    let outcomes = report
        .documents()
        .iter()
        .map(|doc| (doc.path.clone(), doc.outcome.clone()))
        .collect::<Vec<_>>();
    assert_eq!(
        outcomes,
        vec![
            (PathBuf::from("embedded.md"), DocumentOutcome::Updated { replaced: 1 }),
            (PathBuf::from("notes/second.md"), DocumentOutcome::Updated { replaced: 1 }),
        ]
    );
    assert!(report.is_success());
    assert_eq!(report.message(), "Refreshed [[Plan.canvas]] in 2 of 2 documents");
    assert_eq!(
        vault.document("embedded.md").unwrap(),
        format!("# Plan\n\n{}\nFooter\n", expected.full_content())
    );
    assert_eq!(
        vault.document("notes/second.md").unwrap(),
        format!("{}\nSecond copy.\n", expected.full_content())
    );
    assert_eq!(vault.document("unrelated.md").unwrap(), "Nothing to see.\n");

    let again = refresh_embeddings(&vault, &raw, NAME, &config, matcher).unwrap();
    assert!(again.documents().iter().all(|doc| doc.outcome == DocumentOutcome::Skipped));
    assert_eq!(again.written_count(), 0);
}

#[rstest]
#[case::regex(&RegexMatcher)]
#[case::scanner(&LineScanner)]
fn refresh_leaves_link_only_documents_untouched(
    vault: MemoryDocumentStore,
    #[case] matcher: &dyn EmbeddingMatcher,
) {
    let report = refresh_embeddings(
        &vault,
        &fixtures::two_node_canvas(),
        NAME,
        &ConversionConfig::default(),
        matcher,
    )
    .unwrap();

    assert!(report.documents().iter().all(|doc| doc.path != PathBuf::from("linked.md")));
    assert_eq!(
        vault.document("linked.md").unwrap(),
        "Working on [[Plan.canvas]] today.\n"
    );
}

#[rstest]
fn one_failing_document_does_not_block_the_others(vault: MemoryDocumentStore) {
    vault.fail_writes_to("embedded.md");

    let report = refresh_embeddings(
        &vault,
        &fixtures::two_node_canvas(),
        NAME,
        &ConversionConfig::default(),
        &RegexMatcher,
    )
    .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failed_count(), 1);
    assert!(matches!(report.documents()[0].outcome, DocumentOutcome::Failed(_)));
    assert_eq!(report.documents()[1].outcome, DocumentOutcome::Updated { replaced: 1 });
    assert!(vault.document("embedded.md").unwrap().contains("Old"));
    assert!(!vault.document("notes/second.md").unwrap().contains("Old"));
    assert!(report.message().ends_with("; 1 failed"));
}

#[rstest]
fn unreadable_documents_are_reported_individually(vault: MemoryDocumentStore) {
    let embedding = MermaidEmbedding::new(NAME, "flowchart TB\n");
    let paths = [PathBuf::from("missing.md"), PathBuf::from("linked.md")];

    let report = refresh_documents(&vault, &embedding, &paths, &RegexMatcher);

    assert!(matches!(&report.documents()[0].outcome, DocumentOutcome::Failed(message) if message.contains("missing.md")));
    assert_eq!(report.documents()[1].outcome, DocumentOutcome::Appended);
}

#[rstest]
#[case::no_links("no links\n")]
#[case::link_only("see [[Plan.canvas]] for context.\n")]
fn refresh_without_embedding_documents_is_an_error(#[case] contents: &str) {
    let store = MemoryDocumentStore::new().with_document("journal.md", contents);

    let err = refresh_embeddings(
        &store,
        &fixtures::two_node_canvas(),
        NAME,
        &ConversionConfig::default(),
        &RegexMatcher,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        RefreshError::NoEmbeddingDocuments { ref reference_name } if reference_name == NAME
    ));
    assert_eq!(store.document("journal.md").unwrap(), contents);
}

#[rstest]
fn invalid_canvas_aborts_before_touching_documents(vault: MemoryDocumentStore) {
    let before = vault.document("linked.md");

    let err = refresh_embeddings(
        &vault,
        &RawCanvas::default(),
        NAME,
        &ConversionConfig::default(),
        &RegexMatcher,
    )
    .unwrap_err();

    assert!(matches!(err, RefreshError::Conversion(ConvertError::Validation(ValidationError::NoNodes))));
    assert_eq!(vault.document("linked.md"), before);
}

#[test]
fn copies_successful_embedding_to_clipboard() {
    let clipboard = MemoryClipboard::new();
    let result = convert_canvas(&fixtures::two_node_canvas(), NAME, &ConversionConfig::default());

    copy_to_clipboard(&result, &clipboard).unwrap();

    assert_eq!(clipboard.read().unwrap(), result.embedding().unwrap().full_content());
}

#[test]
fn failed_conversion_is_not_copied() {
    let clipboard = MemoryClipboard::new();
    let result = convert_canvas(&RawCanvas::default(), NAME, &ConversionConfig::default());

    let err = copy_to_clipboard(&result, &clipboard).unwrap_err();

    assert!(matches!(err, CopyError::Conversion(ConvertError::Validation(ValidationError::NoNodes))));
    assert!(clipboard.read().is_err());
}

#[test]
fn panic_payloads_become_messages() {
    let borrowed: Box<dyn std::any::Any + Send> = Box::new("static fault");
    let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("owned fault"));
    let other: Box<dyn std::any::Any + Send> = Box::new(42_u32);

    assert_eq!(panic_message(borrowed.as_ref()), "static fault");
    assert_eq!(panic_message(owned.as_ref()), "owned fault");
    assert_eq!(panic_message(other.as_ref()), "unknown panic");
}

#[test]
fn panicking_conversion_step_yields_a_failure_result() {
    let raw = fixtures::two_node_canvas();

    let result = guarded_conversion(&raw, NAME, || panic!("serializer exploded: {}", 7));

    assert!(!result.is_success());
    assert!(result.embedding().is_none());
    assert_eq!(
        result.error(),
        Some(&ConvertError::Internal("serializer exploded: 7".to_owned()))
    );
    assert_eq!(
        result.message(),
        "Canvas conversion failed: internal error during conversion: serializer exploded: 7"
    );
    assert_eq!(result.statistics().nodes_count, 2);
}
