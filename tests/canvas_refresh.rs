// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use canvas_mermaid::cli::{run, Args, CliError};
use canvas_mermaid::config::ConversionConfig;
use canvas_mermaid::ops::{convert_canvas, refresh_documents, refresh_embeddings, DocumentOutcome};
use canvas_mermaid::patch::RegexMatcher;
use canvas_mermaid::store::{load_canvas_file, DocumentStore, VaultFolder};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("canvas-mermaid-it-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path.join(relative)).unwrap()
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

const PLAN_CANVAS: &str = r##"{
  "nodes": [
    {"id": "grp", "type": "group", "label": "Phase 1", "x": -20, "y": -20, "width": 600, "height": 300},
    {"id": "A", "type": "text", "text": "Hello", "x": 0, "y": 0, "width": 200, "height": 60},
    {"id": "B", "type": "text", "text": "World", "x": 0, "y": 200, "width": 200, "height": 60},
    {"id": "doc-1", "type": "file", "file": "notes/Project Brief.md", "x": 800, "y": 0, "width": 300, "height": 400, "color": "4"}
  ],
  "edges": [
    {"id": "e1", "fromNode": "A", "fromSide": "bottom", "toNode": "B", "toSide": "top", "label": "next"},
    {"id": "e2", "fromNode": "B", "toNode": "doc-1", "color": "#ff0000"}
  ]
}"##;

fn run_cli(argv: &[&str]) -> (Result<(), CliError>, String) {
    let args = Args::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let result = run(&args, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn converts_canvas_file_into_expected_callout() {
    let tmp = TempDir::new("convert");
    let canvas = tmp.write("Plan.canvas", PLAN_CANVAS);

    let (result, output) = run_cli(&["canvas-mermaid", "convert", canvas.to_str().unwrap()]);

    result.unwrap();
    assert_eq!(
        output,
        concat!(
            "> [!quote] [[Plan.canvas]]\n",
            "> \n",
            "> ```mermaid\n",
            "> flowchart TB\n",
            "> \n",
            ">   %% Node Definitions\n",
            ">   A[\"Hello\"]\n",
            ">   B[\"World\"]\n",
            ">   doc_1[\"Project Brief\"]\n",
            "> \n",
            ">   %% Group Structure\n",
            ">   subgraph grp[\"Phase 1\"]\n",
            ">     A\n",
            ">     B\n",
            ">   end\n",
            "> \n",
            ">   %% Edge Connections\n",
            ">   A -->|next| B\n",
            ">   B --> doc_1\n",
            "> \n",
            ">   %% Styles\n",
            ">   style doc_1 fill:#f9f9f9,stroke:#44cf6e,stroke-width:2px\n",
            ">   linkStyle 1 stroke:#ff0000,stroke-width:2px\n",
            "> \n",
            ">   %% File Node Internal Links\n",
            ">   class doc_1 internal-link\n",
            "> ```\n",
        )
    );
}

#[test]
fn raw_output_honors_flag_overrides() {
    let tmp = TempDir::new("convert-raw");
    let canvas = tmp.write("Plan.canvas", PLAN_CANVAS);

    let (result, output) = run_cli(&[
        "canvas-mermaid",
        "convert",
        canvas.to_str().unwrap(),
        "--raw",
        "--direction",
        "RL",
        "--no-styling",
        "--no-internal-links",
    ]);

    result.unwrap();
    assert!(output.starts_with("flowchart RL\n"), "{output}");
    assert!(output.lines().all(|line| !line.starts_with('>')), "{output}");
    assert!(!output.contains("style"), "{output}");
    assert!(!output.contains("internal-link"), "{output}");
}

#[test]
fn copy_emits_osc52_sequence_instead_of_the_callout() {
    let tmp = TempDir::new("convert-copy");
    let canvas = tmp.write("Plan.canvas", PLAN_CANVAS);

    let (result, output) = run_cli(&["canvas-mermaid", "convert", canvas.to_str().unwrap(), "--copy"]);

    result.unwrap();
    assert!(output.starts_with("\x1b]52;c;"), "{output:?}");
    assert!(output.ends_with("\x1b\\"), "{output:?}");
    assert!(!output.contains("[!quote]"), "{output:?}");
}

#[test]
fn refresh_patches_vault_documents_and_is_idempotent() {
    let tmp = TempDir::new("refresh");
    let canvas = tmp.write("canvases/Plan.canvas", PLAN_CANVAS);
    let vault = tmp.path().join("vault");
    fs::create_dir_all(&vault).unwrap();
    let stale = "> [!quote] [[Plan.canvas]]\n> \n> ```mermaid\n> flowchart LR\n>   X[\"Stale\"]\n> ```\n";
    fs::write(vault.join("embedded.md"), format!("# Plan\n\n{stale}\nAfter.\n")).unwrap();
    fs::create_dir_all(vault.join("daily")).unwrap();
    fs::write(vault.join("daily/copy.md"), stale).unwrap();
    fs::write(vault.join("daily/log.md"), "Looked at [[Plan.canvas]].\n").unwrap();
    fs::write(vault.join("unrelated.md"), "Nothing here.\n").unwrap();

    let argv = [
        "canvas-mermaid",
        "refresh",
        canvas.to_str().unwrap(),
        "--vault",
        vault.to_str().unwrap(),
    ];
    let (result, output) = run_cli(&argv);
    result.unwrap();
    assert_eq!(
        output,
        "daily/copy.md: updated\nembedded.md: updated\nRefreshed [[Plan.canvas]] in 2 of 2 documents\n"
    );

    let embedding = convert_canvas(
        &load_canvas_file(&canvas).unwrap(),
        "Plan.canvas",
        &ConversionConfig::default(),
    )
    .into_embedding()
    .unwrap();
    assert_eq!(
        fs::read_to_string(vault.join("embedded.md")).unwrap(),
        format!("# Plan\n\n{}\nAfter.\n", embedding.full_content())
    );
    assert_eq!(
        fs::read_to_string(vault.join("daily/copy.md")).unwrap(),
        embedding.full_content()
    );
    assert_eq!(
        fs::read_to_string(vault.join("daily/log.md")).unwrap(),
        "Looked at [[Plan.canvas]].\n"
    );
    assert_eq!(fs::read_to_string(vault.join("unrelated.md")).unwrap(), "Nothing here.\n");

    let (result, output) = run_cli(&argv);
    result.unwrap();
    assert_eq!(
        output,
        "daily/copy.md: unchanged\nembedded.md: unchanged\nRefreshed [[Plan.canvas]] in 0 of 2 documents\n"
    );
}

#[test]
fn refresh_explicit_documents_with_line_scanner() {
    let tmp = TempDir::new("refresh-explicit");
    let canvas = tmp.write("Plan.canvas", PLAN_CANVAS);
    tmp.write("note.md", "No link yet.\n");

    let (result, output) = run_cli(&[
        "canvas-mermaid",
        "refresh",
        canvas.to_str().unwrap(),
        "--vault",
        tmp.path().to_str().unwrap(),
        "--document",
        "note.md",
        "--matcher",
        "scanner",
    ]);

    result.unwrap();
    assert!(output.starts_with("note.md: appended\n"), "{output}");
    assert!(tmp.read("note.md").starts_with("No link yet.\n\n> [!quote] [[Plan.canvas]]\n"));
}

#[test]
fn refresh_reports_missing_references_and_bad_canvases() {
    let tmp = TempDir::new("refresh-errors");
    let canvas = tmp.write("Plan.canvas", PLAN_CANVAS);
    let empty = tmp.write("Empty.canvas", r#"{"nodes": [], "edges": []}"#);
    tmp.write("vault/note.md", "Only a link to [[Plan.canvas]].\n");
    let vault = tmp.path().join("vault");

    let (result, _) = run_cli(&[
        "canvas-mermaid",
        "refresh",
        canvas.to_str().unwrap(),
        "--vault",
        vault.to_str().unwrap(),
    ]);
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "no documents embed a callout for [[Plan.canvas]]");

    let (result, _) = run_cli(&["canvas-mermaid", "convert", empty.to_str().unwrap()]);
    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Canvas conversion failed: invalid canvas: canvas does not contain any nodes"
    );
    assert_eq!(tmp.read("vault/note.md"), "Only a link to [[Plan.canvas]].\n");
}

#[test]
fn library_round_trip_through_vault_folder() {
    let tmp = TempDir::new("library");
    let canvas = load_canvas_file(&tmp.write("Plan.canvas", PLAN_CANVAS)).unwrap();
    tmp.write("a.md", "[[Plan.canvas]]\n");
    let store = VaultFolder::new(tmp.path());
    let config = ConversionConfig::default();

    let embedding = convert_canvas(&canvas, "Plan.canvas", &config).into_embedding().unwrap();
    let first = refresh_documents(&store, &embedding, &[PathBuf::from("a.md")], &RegexMatcher);
    assert_eq!(first.documents()[0].outcome, DocumentOutcome::Appended);

    let appended = store.read(Path::new("a.md")).unwrap();
    let second = refresh_embeddings(&store, &canvas, "Plan.canvas", &config, &RegexMatcher).unwrap();
    assert_eq!(second.documents()[0].outcome, DocumentOutcome::Skipped);
    assert_eq!(store.read(Path::new("a.md")).unwrap(), appended);
}
