//! rulec - a deterministic filter-list compiler.
//!
//! This crate compiles one or more filter-list sources (adblock-syntax or
//! hosts-file lists) into a single rule list for DNS-level blockers, by
//! applying an ordered set of named text transformations.
//!
//! # Features
//!
//! - **Closed transformation set**: eleven named transformations with an
//!   exhaustively-matched enum, validated before any I/O
//! - **Two-phase pipeline**: source-scoped transformations normalize each
//!   source, global transformations clean up the merged set
//! - **Inclusion/exclusion patterns**: glob, `/regex/`, and substring
//!   filters per source and globally
//! - **Deterministic output**: `\n` line endings, UTF-8 without BOM, and a
//!   SHA-384 content hash that is bit-identical across runs
//! - **Injected fetching**: sources are resolved through a [`Fetcher`]
//!   capability, so tests and callers can supply in-memory content
//! - **Atomic persistence**: output files are written via temp-file +
//!   rename, never left partially written
//!
//! # Quick Start
//!
//! ```
//! use rulec::{compile, Configuration, FilterSource, MemoryFetcher};
//!
//! let fetcher = MemoryFetcher::new()
//!     .with("ads.txt", "||ads.example^\n! comment\n||ads.example^\n");
//!
//! let config = Configuration {
//!     name: "My List".to_string(),
//!     sources: vec![FilterSource::new("ads.txt")],
//!     transformations: vec![
//!         "RemoveComments".to_string(),
//!         "Deduplicate".to_string(),
//!         "InsertFinalNewLine".to_string(),
//!     ],
//!     ..Default::default()
//! };
//!
//! let result = compile(&config, &fetcher).unwrap();
//! assert!(result.success);
//! assert_eq!(result.rule_count, 1);
//! assert_eq!(result.hash.len(), 96);
//! ```
//!
//! # Transformations
//!
//! `RemoveComments`, `Compress`, `RemoveModifiers`, `Validate`,
//! `ValidateAllowIp`, `Deduplicate`, `InvertAllow`, `RemoveEmptyLines`,
//! `TrimLines`, `InsertFinalNewLine`, `ConvertToAscii`. Names are
//! case-sensitive; anything else is a configuration error.
//!
//! # Ordering
//!
//! Sources are processed in configuration order and their outputs are
//! concatenated in that order. For each source: fetch, inclusion/exclusion
//! patterns, then source-scoped transformations. Over the merged sequence:
//! global patterns, then global transformations. No stage sorts lines;
//! `Deduplicate` keeps the first occurrence.

mod error;
mod pattern;
mod source;

pub mod compiler;
pub mod config;
pub mod fetch;
pub mod output;
pub mod transform;

// Re-export core types
pub use error::{Error, Result};

// Re-export configuration types
pub use config::{
    detect_format, read_configuration, ConfigFormat, Configuration, FilterSource, SourceKind,
};

// Re-export the compilation API
pub use compiler::{compile, compile_to_file, CompilationResult, CompiledPlan};

// Re-export fetching
pub use fetch::{DefaultFetcher, Fetcher, MemoryFetcher};

// Re-export pattern filtering and transformations
pub use pattern::PatternSet;
pub use transform::Transformation;
