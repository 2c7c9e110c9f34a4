// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Collaborator capabilities the conversion core talks through.
//!
//! [`DocumentStore`] reads, writes and discovers Markdown documents; [`ClipboardSink`] hands an
//! embedding to the user. [`VaultFolder`] and [`Osc52Clipboard`] are the real implementations,
//! the `Memory*` types back tests and dry runs.

mod clipboard;
mod memory;
pub mod vault;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::canvas::RawCanvas;

pub use clipboard::Osc52Clipboard;
pub use memory::{MemoryClipboard, MemoryDocumentStore};
pub use vault::{VaultFolder, WriteDurability};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("document not found: {path:?}")]
    NotFound { path: PathBuf },
    #[error("invalid relative path: {path:?}")]
    InvalidRelativePath { path: PathBuf },
    #[error("path is outside vault: vault={vault_dir:?} path={path:?}")]
    PathOutsideVault { vault_dir: PathBuf, path: PathBuf },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
    #[error("clipboard error: {message}")]
    Clipboard { message: String },
}

/// Access to the Markdown documents that may embed a diagram.
///
/// Paths are relative to the store's root.
pub trait DocumentStore {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> Result<String, StoreError>;

    fn write(&self, path: &Path, contents: &str) -> Result<(), StoreError>;

    /// Documents that link to `reference_name` (`[[reference_name]]`), sorted by path.
    fn locate_by_reference(&self, reference_name: &str) -> Result<Vec<PathBuf>, StoreError>;
}

pub trait ClipboardSink {
    fn write(&self, text: &str) -> Result<(), StoreError>;

    fn read(&self) -> Result<String, StoreError>;
}

/// Reads and parses a `.canvas` file.
pub fn load_canvas_file(path: &Path) -> Result<RawCanvas, StoreError> {
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    RawCanvas::from_json(&contents).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// `Plan.canvas` for `diagrams/Plan.canvas`: the name documents use to link the diagram.
pub fn canvas_reference_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}
