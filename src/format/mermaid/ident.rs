// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

/// Tokens Mermaid's flowchart grammar treats as keywords when they appear as bare node ids.
const RESERVED_IDENTS: &[&str] = &["end", "subgraph", "graph", "flowchart"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MermaidIdentError {
    #[error("must not be empty")]
    Empty,
    #[error("contains invalid character: '{ch}'")]
    InvalidChar { ch: char },
    #[error("is a reserved flowchart keyword")]
    Reserved,
}

/// Rewrites `raw` to the `[A-Za-z0-9_]` alphabet by replacing every other character with `_`.
///
/// Pure and idempotent: `sanitize_mermaid_ident(&sanitize_mermaid_ident(x)) == sanitize_mermaid_ident(x)`.
pub fn sanitize_mermaid_ident(raw: &str) -> String {
    raw.chars()
        .map(|ch| if is_ident_char(ch) { ch } else { '_' })
        .collect()
}

pub fn is_reserved_ident(ident: &str) -> bool {
    RESERVED_IDENTS.contains(&ident)
}

pub fn validate_mermaid_ident(ident: &str) -> Result<(), MermaidIdentError> {
    if ident.is_empty() {
        return Err(MermaidIdentError::Empty);
    }
    if let Some(ch) = ident.chars().find(|ch| !is_ident_char(*ch)) {
        return Err(MermaidIdentError::InvalidChar { ch });
    }
    if is_reserved_ident(ident) {
        return Err(MermaidIdentError::Reserved);
    }
    Ok(())
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::{sanitize_mermaid_ident, validate_mermaid_ident, MermaidIdentError};

    #[test]
    fn replaces_punctuation_with_underscores() {
        assert_eq!(sanitize_mermaid_ident("n-1.2"), "n_1_2");
        assert_eq!(sanitize_mermaid_ident("a b/c:d"), "a_b_c_d");
    }

    #[test]
    fn replaces_each_non_ascii_char_once() {
        assert_eq!(sanitize_mermaid_ident("café"), "caf_");
        assert_eq!(sanitize_mermaid_ident("🚀x"), "_x");
    }

    #[test]
    fn sanitize_is_idempotent_and_deterministic() {
        for raw in ["n-1.2", "plain", "__", "ünï-cödé", "6f3a9c2e1b7d4a05", ""] {
            let once = sanitize_mermaid_ident(raw);
            assert_eq!(sanitize_mermaid_ident(&once), once, "not idempotent for {raw:?}");
            assert_eq!(sanitize_mermaid_ident(raw), once, "not deterministic for {raw:?}");
            assert!(once.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn validate_reports_the_offending_input() {
        assert_eq!(validate_mermaid_ident(""), Err(MermaidIdentError::Empty));
        assert_eq!(
            validate_mermaid_ident("a-b"),
            Err(MermaidIdentError::InvalidChar { ch: '-' })
        );
        assert_eq!(validate_mermaid_ident("end"), Err(MermaidIdentError::Reserved));
        assert_eq!(validate_mermaid_ident("End"), Ok(()));
        assert_eq!(validate_mermaid_ident("n_1_2"), Ok(()));
    }
}
