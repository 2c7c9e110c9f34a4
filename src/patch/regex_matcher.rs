// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::Range;

use regex::Regex;

use super::{EmbeddingMatcher, PatchError};

/// Matches embedding blocks with one multi-line regular expression.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexMatcher;

impl RegexMatcher {
    /// Pattern for blocks titled `[[reference_name]]`. The name is escaped, so metacharacters in it
    /// match literally.
    pub fn pattern(reference_name: &str) -> Result<Regex, PatchError> {
        let pattern = format!(
            concat!(
                r"(?m)^>[ \t]?\[!(?i:quote)\][ \t]+\[\[{name}\]\][ \t]*\r?\n",
                r">[ \t]*\r?\n",
                r">[ \t]?```mermaid[ \t]*\r?\n",
                r"(?:>.*\r?\n)*?",
                r">[ \t]?```[ \t]*\r?(?:\n|\z)",
            ),
            name = regex::escape(reference_name)
        );
        Regex::new(&pattern).map_err(|source| PatchError::Pattern {
            reference_name: reference_name.to_owned(),
            source,
        })
    }
}

impl EmbeddingMatcher for RegexMatcher {
    fn find_blocks(
        &self,
        document: &str,
        reference_name: &str,
    ) -> Result<Vec<Range<usize>>, PatchError> {
        let pattern = Self::pattern(reference_name)?;
        Ok(pattern.find_iter(document).map(|m| m.range()).collect())
    }
}
