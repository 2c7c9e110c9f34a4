// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{ClipboardSink, DocumentStore, StoreError};
use crate::patch::references_diagram;

/// In-memory document store keyed by relative path.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RefCell<BTreeMap<PathBuf, String>>,
    failing_writes: RefCell<Vec<PathBuf>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.documents.borrow_mut().insert(path.into(), contents.into());
        self
    }

    /// Makes every later write to `path` fail with an io error.
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.failing_writes.borrow_mut().push(path.into());
    }

    pub fn document(&self, path: impl AsRef<Path>) -> Option<String> {
        self.documents.borrow().get(path.as_ref()).cloned()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn exists(&self, path: &Path) -> bool {
        self.documents.borrow().contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String, StoreError> {
        self.documents
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_path_buf(),
            })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        if self.failing_writes.borrow().iter().any(|failing| failing == path) {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "write refused"),
            });
        }
        self.documents
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_owned());
        Ok(())
    }

    fn locate_by_reference(&self, reference_name: &str) -> Result<Vec<PathBuf>, StoreError> {
        Ok(self
            .documents
            .borrow()
            .iter()
            .filter(|(_, contents)| references_diagram(contents, reference_name))
            .map(|(path, _)| path.clone())
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: RefCell<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write(&self, text: &str) -> Result<(), StoreError> {
        *self.contents.borrow_mut() = Some(text.to_owned());
        Ok(())
    }

    fn read(&self) -> Result<String, StoreError> {
        self.contents.borrow().clone().ok_or_else(|| StoreError::Clipboard {
            message: "clipboard is empty".to_owned(),
        })
    }
}
