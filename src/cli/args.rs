// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line arguments, parsed with [`clap`].

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{ConversionConfig, Direction};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the Mermaid callout for a canvas file
    Convert {
        /// Path to the `.canvas` file
        canvas: PathBuf,

        /// Reference name used in the callout title (defaults to the canvas file name)
        #[arg(long)]
        name: Option<String>,

        /// Print only the flowchart, without the callout wrapper
        #[arg(long, conflicts_with = "copy")]
        raw: bool,

        /// Copy the callout to the clipboard (OSC 52) instead of printing it
        #[arg(long)]
        copy: bool,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Refresh the callouts in every document that already embeds the canvas
    Refresh {
        /// Path to the `.canvas` file
        canvas: PathBuf,

        /// Vault directory searched for Markdown documents
        #[arg(long, default_value = ".")]
        vault: PathBuf,

        /// Patch these documents (relative to the vault), appending a callout where none exists
        #[arg(long = "document")]
        documents: Vec<PathBuf>,

        /// Reference name used in the callout title (defaults to the canvas file name)
        #[arg(long)]
        name: Option<String>,

        /// Flush writes to stable storage where supported
        #[arg(long)]
        durable_writes: bool,

        /// Strategy used to find existing callouts
        #[arg(long, value_enum, default_value_t = MatcherKind::Regex)]
        matcher: MatcherKind,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    Regex,
    Scanner,
}

/// Flags that take precedence over the configuration file.
#[derive(clap::Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Flowchart direction (TB, TD, BT, RL, LR)
    #[arg(long)]
    pub direction: Option<Direction>,

    /// Do not emit style/linkStyle statements
    #[arg(long)]
    pub no_styling: bool,

    /// Do not mark file nodes with the internal-link class
    #[arg(long)]
    pub no_internal_links: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: ConversionConfig) -> ConversionConfig {
        if let Some(direction) = self.direction {
            config = config.with_direction(direction);
        }
        if self.no_styling {
            config = config.with_styling(false);
        }
        if self.no_internal_links {
            config = config.with_internal_links(false);
        }
        config
    }
}
