//! Compilation orchestration.

use std::path::Path;
use std::time::Instant;

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::output;
use crate::pattern::PatternSet;
use crate::source::SourcePlan;
use crate::transform::Transformation;

/// Result of a compilation run.
///
/// `rule_count` and `hash` are deterministic for a fixed configuration and
/// fixed source content; `elapsed_ms` is the only non-deterministic field.
#[derive(Debug, Clone, Default)]
pub struct CompilationResult {
    /// Whether compilation succeeded
    pub success: bool,
    /// Name from the configuration
    pub config_name: String,
    /// Version from the configuration
    pub config_version: String,
    /// Number of non-empty, non-comment lines in the final output
    pub rule_count: usize,
    /// SHA-384 of the serialized output, 96 lowercase hex characters
    pub hash: String,
    /// Elapsed time in milliseconds
    pub elapsed_ms: u64,
    /// Path the output was written to, when persistence succeeded
    pub output_path: Option<String>,
    /// Error message when `success` is false
    pub error_message: Option<String>,
}

/// A validated compilation plan.
///
/// Building the plan performs every configuration check — unknown
/// transformation names, empty source list, malformed patterns — before any
/// I/O happens. A plan is immutable and can be run any number of times.
#[derive(Debug)]
pub struct CompiledPlan {
    config: Configuration,
    sources: Vec<SourcePlan>,
    global_transformations: Vec<Transformation>,
    global_patterns: PatternSet,
    final_newline: bool,
}

impl CompiledPlan {
    /// Validate a configuration into a runnable plan.
    pub fn new(config: Configuration) -> Result<Self> {
        if config.sources.is_empty() {
            return Err(Error::EmptySources);
        }

        let sources = config
            .sources
            .iter()
            .map(SourcePlan::new)
            .collect::<Result<Vec<_>>>()?;
        let global_transformations = Transformation::parse_list(&config.transformations)?;
        let global_patterns = PatternSet::compile(&config.inclusions, &config.exclusions)?;

        // InsertFinalNewLine only takes effect at serialization, wherever
        // it appears in the effective transformation lists.
        let final_newline = global_transformations.contains(&Transformation::InsertFinalNewLine)
            || sources
                .iter()
                .any(|s| s.transformations().contains(&Transformation::InsertFinalNewLine));

        Ok(Self {
            config,
            sources,
            global_transformations,
            global_patterns,
            final_newline,
        })
    }

    /// Number of validated sources in the plan.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Run the pipeline without persisting the output.
    pub fn run(&self, fetcher: &dyn Fetcher) -> CompilationResult {
        self.run_inner(fetcher, None)
    }

    /// Run the pipeline and write the output file atomically.
    ///
    /// Nothing is written when any source fails to resolve. When the write
    /// itself fails, the in-memory `hash` and `rule_count` are still
    /// reported and `output_path` stays `None`.
    pub fn run_to_file(&self, fetcher: &dyn Fetcher, output: &Path) -> CompilationResult {
        self.run_inner(fetcher, Some(output))
    }

    fn run_inner(&self, fetcher: &dyn Fetcher, output_path: Option<&Path>) -> CompilationResult {
        let start = Instant::now();
        let mut result = CompilationResult {
            config_name: self.config.name.clone(),
            config_version: self.config.version.clone(),
            ..Default::default()
        };

        log::info!(
            "compiling {:?}: {} sources",
            self.config.name,
            self.sources.len()
        );

        // Resolve and process sources in configuration order; the first
        // failure aborts the whole run.
        let mut merged = Vec::new();
        for source in &self.sources {
            match source.process(fetcher) {
                Ok(lines) => {
                    log::info!(
                        "source {:?}: {} lines after processing",
                        source.display_name(),
                        lines.len()
                    );
                    merged.extend(lines);
                }
                Err(e) => {
                    log::warn!("compilation aborted: {}", e);
                    result.error_message = Some(e.to_string());
                    result.elapsed_ms = start.elapsed().as_millis() as u64;
                    return result;
                }
            }
        }

        let filtered = self.global_patterns.filter(merged);
        let lines = Transformation::apply_all(&self.global_transformations, filtered);

        let text = output::serialize(&lines, self.final_newline);
        result.hash = output::sha384_hex(text.as_bytes());
        result.rule_count = output::count_rules(&text);

        if let Some(path) = output_path {
            match output::write_atomic(path, text.as_bytes()) {
                Ok(()) => {
                    log::info!("wrote {} bytes to {}", text.len(), path.display());
                    result.output_path = Some(path.display().to_string());
                }
                Err(e) => {
                    log::warn!("{}", e);
                    result.error_message = Some(e.to_string());
                    result.elapsed_ms = start.elapsed().as_millis() as u64;
                    return result;
                }
            }
        }

        result.success = true;
        result.elapsed_ms = start.elapsed().as_millis() as u64;
        result
    }
}

/// Compile a configuration without persisting the output.
///
/// Configuration errors are returned as `Err` before any source is
/// fetched; runtime failures produce `Ok` with `success` set to false.
pub fn compile(config: &Configuration, fetcher: &dyn Fetcher) -> Result<CompilationResult> {
    Ok(CompiledPlan::new(config.clone())?.run(fetcher))
}

/// Compile a configuration and write the output file atomically.
pub fn compile_to_file(
    config: &Configuration,
    fetcher: &dyn Fetcher,
    output: &Path,
) -> Result<CompilationResult> {
    Ok(CompiledPlan::new(config.clone())?.run_to_file(fetcher, output))
}
