// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! File-system document store rooted at a vault directory.

mod helpers;


use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use self::helpers::{collect_markdown_files, to_relative_path, write_atomic_in_vault};
use super::{DocumentStore, StoreError};
use crate::patch::references_diagram;

#[derive(Debug, Clone)]
pub struct VaultFolder {
    root: PathBuf,
    durability: WriteDurability,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

impl VaultFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every `.md`/`.markdown` file below the root, relative and sorted. Hidden directories and
    /// symlinks are skipped.
    pub fn markdown_documents(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut documents = Vec::new();
        collect_markdown_files(&self.root, Path::new(""), &mut documents)?;
        documents.sort();
        Ok(documents)
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf, StoreError> {
        let relative = to_relative_path(&self.root, path)?;
        Ok(self.root.join(relative))
    }
}

impl DocumentStore for VaultFolder {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_ok_and(|path| path.is_file())
    }

    fn read(&self, path: &Path) -> Result<String, StoreError> {
        let full_path = self.resolve(path)?;
        fs::read_to_string(&full_path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound { path: full_path }
            } else {
                StoreError::Io {
                    path: full_path,
                    source,
                }
            }
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        let relative = to_relative_path(&self.root, path)?;
        write_atomic_in_vault(&self.root, &relative, contents.as_bytes(), self.durability)?;
        info!(path = relative.display().to_string(), bytes = contents.len(); "wrote document");
        Ok(())
    }

    fn locate_by_reference(&self, reference_name: &str) -> Result<Vec<PathBuf>, StoreError> {
        let mut referencing = Vec::new();
        for document in self.markdown_documents()? {
            match self.read(&document) {
                Ok(contents) if references_diagram(&contents, reference_name) => {
                    referencing.push(document);
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(
                        path = document.display().to_string(),
                        error = err.to_string();
                        "skipping unreadable document"
                    );
                }
            }
        }
        info!(
            reference = reference_name,
            documents = referencing.len();
            "located referencing documents"
        );
        Ok(referencing)
    }
}
