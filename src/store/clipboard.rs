// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::{ClipboardSink, StoreError};

/// Clipboard sink that asks the terminal to copy text via the OSC 52 escape sequence.
///
/// Works over SSH and inside multiplexers that forward OSC 52. Terminals do not reliably answer
/// clipboard queries, so [`ClipboardSink::read`] returns the last text written through this sink.
pub struct Osc52Clipboard<W: Write> {
    out: RefCell<W>,
    last: RefCell<Option<String>>,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            last: RefCell::new(None),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn write(&self, text: &str) -> Result<(), StoreError> {
        let mut out = self.out.borrow_mut();
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| out.flush())
            .map_err(|err| StoreError::Clipboard {
                message: err.to_string(),
            })?;
        *self.last.borrow_mut() = Some(text.to_owned());
        Ok(())
    }

    fn read(&self) -> Result<String, StoreError> {
        self.last.borrow().clone().ok_or_else(|| StoreError::Clipboard {
            message: "nothing has been copied yet".to_owned(),
        })
    }
}

fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
