// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Group membership and nesting inferred from bounding boxes alone.
//!
//! Both resolvers break ties by declaration order: the first containing group wins, which is not
//! necessarily the tightest fit. With overlapping or concentric groups the answer is therefore
//! order-dependent; callers that care must order their groups accordingly.

use crate::model::geometry::BoundingBox;

/// For every item box, the index of the first group box that contains it.
pub fn assign_members(items: &[BoundingBox], groups: &[BoundingBox]) -> Vec<Option<usize>> {
    items
        .iter()
        .map(|item| groups.iter().position(|group| group.contains(item)))
        .collect()
}

/// For every group, the index of its immediate parent group.
///
/// Group `a` nests under `b` when `a != b` and `b` contains `a`. When two groups have identical
/// boxes only the later-declared one nests under the earlier one, which keeps the result a forest.
pub fn resolve_parents(groups: &[BoundingBox]) -> Vec<Option<usize>> {
    groups
        .iter()
        .enumerate()
        .map(|(child_idx, child)| {
            groups.iter().enumerate().position(|(parent_idx, parent)| {
                parent_idx != child_idx
                    && parent.contains(child)
                    && !(parent == child && parent_idx > child_idx)
            })
        })
        .collect()
}
