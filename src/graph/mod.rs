// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canonical graph construction: validation, id sanitization and geometric group inference.

pub mod builder;
pub mod containment;

pub use builder::{build_graph, ValidationError};
