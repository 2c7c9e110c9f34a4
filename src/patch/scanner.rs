// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::Range;

use super::{EmbeddingMatcher, PatchError};

/// Hand-written line scanner recognizing the same blocks as [`super::RegexMatcher`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LineScanner;

impl EmbeddingMatcher for LineScanner {
    fn find_blocks(
        &self,
        document: &str,
        reference_name: &str,
    ) -> Result<Vec<Range<usize>>, PatchError> {
        let lines = split_lines(document);
        let mut blocks = Vec::new();
        let mut line_idx = 0;
        while line_idx < lines.len() {
            match match_block(document, &lines, line_idx, reference_name) {
                Some((range, next_idx)) => {
                    blocks.push(range);
                    line_idx = next_idx;
                }
                None => line_idx += 1,
            }
        }
        Ok(blocks)
    }
}

#[derive(Debug, Clone, Copy)]
struct Line {
    start: usize,
    /// End of the content, before `\n` (a trailing `\r` is content here).
    content_end: usize,
    /// End including the line break.
    end: usize,
    terminated: bool,
}

fn split_lines(document: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut start = 0;
    for idx in memchr::memchr_iter(b'\n', document.as_bytes()) {
        lines.push(Line {
            start,
            content_end: idx,
            end: idx + 1,
            terminated: true,
        });
        start = idx + 1;
    }
    if start < document.len() {
        lines.push(Line {
            start,
            content_end: document.len(),
            end: document.len(),
            terminated: false,
        });
    }
    lines
}

/// Block starting at `first`, plus the index of the line after it.
fn match_block(
    document: &str,
    lines: &[Line],
    first: usize,
    reference_name: &str,
) -> Option<(Range<usize>, usize)> {
    let text = |line: &Line| &document[line.start..line.content_end];

    let title = lines.get(first).filter(|line| line.terminated)?;
    if !is_title(text(title), reference_name) {
        return None;
    }
    let spacer = lines.get(first + 1).filter(|line| line.terminated)?;
    if !is_blank_quote(text(spacer)) {
        return None;
    }
    let fence = lines.get(first + 2).filter(|line| line.terminated)?;
    if !is_fence(text(fence), "mermaid") {
        return None;
    }

    for (offset, line) in lines[first + 3..].iter().enumerate() {
        let line_text = text(line);
        if !line_text.starts_with('>') {
            return None;
        }
        if is_fence(line_text, "") {
            let range = lines[first].start..line.end;
            return Some((range, first + 3 + offset + 1));
        }
        if !line.terminated {
            return None;
        }
    }
    None
}

/// Strips `>` and at most one following space or tab.
fn quoted(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('>')?;
    Some(rest.strip_prefix([' ', '\t']).unwrap_or(rest))
}

fn strip_line_end(line: &str) -> &str {
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.trim_end_matches([' ', '\t'])
}

fn is_title(line: &str, reference_name: &str) -> bool {
    let Some(rest) = quoted(line) else {
        return false;
    };
    let rest = rest.strip_suffix('\r').unwrap_or(rest);
    let Some(marker) = rest.get(..8) else {
        return false;
    };
    if !marker.eq_ignore_ascii_case("[!quote]") {
        return false;
    }
    let after_marker = &rest[8..];
    let link = after_marker.trim_start_matches([' ', '\t']);
    if link.len() == after_marker.len() {
        return false;
    }
    let link = link.trim_end_matches([' ', '\t']);
    link.strip_prefix("[[")
        .and_then(|link| link.strip_suffix("]]"))
        .is_some_and(|name| name == reference_name)
}

fn is_blank_quote(line: &str) -> bool {
    line.strip_prefix('>')
        .is_some_and(|rest| strip_line_end(rest).is_empty())
}

fn is_fence(line: &str, language: &str) -> bool {
    quoted(line)
        .and_then(|rest| rest.strip_prefix("```"))
        .is_some_and(|rest| strip_line_end(rest) == language)
}
