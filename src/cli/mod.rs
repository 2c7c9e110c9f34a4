// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! CLI logic: wires files, config and the conversion operations together.

mod args;

pub use args::{Args, Command, ConfigOverrides, MatcherKind};

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::config::{load_config, ConfigError, ConversionConfig};
use crate::ops::{
    convert_canvas, copy_to_clipboard, refresh_documents, refresh_embeddings, CopyError,
    RefreshError, RefreshReport,
};
use crate::patch::{EmbeddingMatcher, LineScanner, RegexMatcher};
use crate::store::{
    canvas_reference_name, load_canvas_file, Osc52Clipboard, StoreError, VaultFolder,
    WriteDurability,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("cannot derive a reference name from {0:?}; pass --name")]
    NoReferenceName(PathBuf),
    #[error("{0}")]
    Conversion(String),
    #[error(transparent)]
    Refresh(#[from] RefreshError),
    #[error(transparent)]
    Copy(#[from] CopyError),
    #[error("{failed} of {total} documents could not be refreshed")]
    DocumentsFailed { failed: usize, total: usize },
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Runs the parsed command, writing user-facing output to `out`.
pub fn run(args: &Args, out: &mut dyn Write) -> Result<(), CliError> {
    let file_config = load_config(args.config.as_deref())?;

    match &args.command {
        Command::Convert {
            canvas,
            name,
            raw,
            copy,
            overrides,
        } => {
            let config = overrides.apply(file_config);
            run_convert(canvas, name.as_deref(), *raw, *copy, &config, out)
        }
        Command::Refresh {
            canvas,
            vault,
            documents,
            name,
            durable_writes,
            matcher,
            overrides,
        } => {
            let config = overrides.apply(file_config);
            let durability = if *durable_writes {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            };
            let store = VaultFolder::new(vault).with_durability(durability);
            let matcher: &dyn EmbeddingMatcher = match matcher {
                MatcherKind::Regex => &RegexMatcher,
                MatcherKind::Scanner => &LineScanner,
            };
            let report =
                run_refresh(canvas, name.as_deref(), &store, documents, matcher, &config)?;
            print_report(&report, out)?;
            if report.is_success() {
                Ok(())
            } else {
                Err(CliError::DocumentsFailed {
                    failed: report.failed_count(),
                    total: report.documents().len(),
                })
            }
        }
    }
}

fn reference_name(canvas: &Path, name: Option<&str>) -> Result<String, CliError> {
    match name {
        Some(name) => Ok(name.to_owned()),
        None => canvas_reference_name(canvas)
            .ok_or_else(|| CliError::NoReferenceName(canvas.to_path_buf())),
    }
}

fn run_convert(
    canvas: &Path,
    name: Option<&str>,
    raw: bool,
    copy: bool,
    config: &ConversionConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let reference_name = reference_name(canvas, name)?;
    let canvas_data = load_canvas_file(canvas)?;
    let result = convert_canvas(&canvas_data, &reference_name, config);

    if copy {
        copy_to_clipboard(&result, &Osc52Clipboard::new(&mut *out))?;
        info!(reference = reference_name.as_str(); "callout copied");
        return Ok(());
    }

    let message = result.message();
    let embedding = result
        .into_embedding()
        .map_err(|_| CliError::Conversion(message))?;
    if raw {
        out.write_all(embedding.flowchart().as_bytes())?;
    } else {
        out.write_all(embedding.full_content().as_bytes())?;
    }
    Ok(())
}

fn run_refresh(
    canvas: &Path,
    name: Option<&str>,
    store: &VaultFolder,
    documents: &[PathBuf],
    matcher: &dyn EmbeddingMatcher,
    config: &ConversionConfig,
) -> Result<RefreshReport, CliError> {
    let reference_name = reference_name(canvas, name)?;
    let canvas_data = load_canvas_file(canvas)?;

    if documents.is_empty() {
        return Ok(refresh_embeddings(
            store,
            &canvas_data,
            &reference_name,
            config,
            matcher,
        )?);
    }

    let result = convert_canvas(&canvas_data, &reference_name, config);
    let message = result.message();
    let embedding = result
        .into_embedding()
        .map_err(|_| CliError::Conversion(message))?;
    Ok(refresh_documents(store, &embedding, documents, matcher))
}

fn print_report(report: &RefreshReport, out: &mut dyn Write) -> io::Result<()> {
    for document in report.documents() {
        writeln!(out, "{}: {}", document.path.display(), document.outcome)?;
    }
    writeln!(out, "{}", report.message())
}
