//! Source resolution and per-source processing.

use flate2::read::GzDecoder;
use std::io::Read;

use crate::config::FilterSource;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::pattern::PatternSet;
use crate::transform::Transformation;

/// Check if data is gzip compressed.
fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b
}

/// Resolve a source into its raw lines.
///
/// Gzip payloads are decompressed transparently; the result must decode as
/// UTF-8. No transformation is applied here.
pub(crate) fn resolve(spec: &FilterSource, fetcher: &dyn Fetcher) -> Result<Vec<String>> {
    let raw = fetcher.fetch(&spec.source)?;

    let data = if is_gzip(&raw) {
        let mut decoder = GzDecoder::new(&raw[..]);
        let mut data = Vec::new();
        decoder.read_to_end(&mut data).map_err(|e| Error::Fetch {
            source: spec.source.clone(),
            reason: format!("gzip decompression failed: {}", e),
        })?;
        data
    } else {
        raw
    };

    let text = String::from_utf8(data).map_err(|_| Error::Decode(spec.source.clone()))?;
    Ok(text.lines().map(str::to_string).collect())
}

/// One source after configuration validation: parsed transformations and
/// compiled patterns, ready to run without further checks.
#[derive(Debug, Clone)]
pub(crate) struct SourcePlan {
    spec: FilterSource,
    transformations: Vec<Transformation>,
    patterns: PatternSet,
}

impl SourcePlan {
    /// Validate a source spec into a runnable plan. No I/O happens here.
    pub(crate) fn new(spec: &FilterSource) -> Result<Self> {
        if spec.source.is_empty() {
            return Err(Error::EmptySource(spec.display_name().to_string()));
        }
        Ok(Self {
            spec: spec.clone(),
            transformations: Transformation::parse_list(&spec.transformations)?,
            patterns: PatternSet::compile(&spec.inclusions, &spec.exclusions)?,
        })
    }

    pub(crate) fn transformations(&self) -> &[Transformation] {
        &self.transformations
    }

    pub(crate) fn display_name(&self) -> &str {
        self.spec.display_name()
    }

    /// Resolve and process this source: fetch, filter, transform.
    ///
    /// The output is this source's contribution to the merged rule set;
    /// global patterns and transformations are applied later, over the
    /// merged sequence.
    pub(crate) fn process(&self, fetcher: &dyn Fetcher) -> Result<Vec<String>> {
        let lines = resolve(&self.spec, fetcher)?;
        log::debug!(
            "source {:?}: fetched {} lines",
            self.display_name(),
            lines.len()
        );

        let lines = self.patterns.filter(lines);
        Ok(Transformation::apply_all(&self.transformations, lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn spec(source: &str) -> FilterSource {
        FilterSource::new(source)
    }

    #[test]
    fn test_resolve_splits_lines() {
        let fetcher = MemoryFetcher::new().with("list.txt", "||a.example^\n||b.example^\n");
        let lines = resolve(&spec("list.txt"), &fetcher).unwrap();
        assert_eq!(lines, vec!["||a.example^", "||b.example^"]);
    }

    #[test]
    fn test_resolve_tolerates_crlf() {
        let fetcher = MemoryFetcher::new().with("list.txt", "||a.example^\r\n||b.example^\r\n");
        let lines = resolve(&spec("list.txt"), &fetcher).unwrap();
        assert_eq!(lines, vec!["||a.example^", "||b.example^"]);
    }

    #[test]
    fn test_resolve_gzip_source() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"||a.example^\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let fetcher = MemoryFetcher::new().with("list.txt.gz", compressed);
        let lines = resolve(&spec("list.txt.gz"), &fetcher).unwrap();
        assert_eq!(lines, vec!["||a.example^"]);
    }

    #[test]
    fn test_resolve_rejects_invalid_utf8() {
        let fetcher = MemoryFetcher::new().with("list.bin", vec![0xff, 0xfe, 0x00]);
        let err = resolve(&spec("list.bin"), &fetcher).unwrap_err();
        assert!(matches!(err, Error::Decode(source) if source == "list.bin"));
    }

    #[test]
    fn test_plan_rejects_empty_source() {
        let err = SourcePlan::new(&FilterSource::default()).unwrap_err();
        assert!(matches!(err, Error::EmptySource(_)));
    }

    #[test]
    fn test_plan_rejects_unknown_transformation() {
        let mut s = spec("list.txt");
        s.transformations = vec!["Bogus".to_string()];
        let err = SourcePlan::new(&s).unwrap_err();
        assert!(matches!(err, Error::UnknownTransformation(_)));
    }

    #[test]
    fn test_process_applies_patterns_then_transformations() {
        let fetcher = MemoryFetcher::new().with(
            "list.txt",
            "! header\n||keep.example^\n||keep.example^\n||skip.other^\n",
        );

        let mut s = spec("list.txt");
        s.inclusions = vec!["example".to_string()];
        s.transformations = vec!["Deduplicate".to_string()];

        let plan = SourcePlan::new(&s).unwrap();
        let lines = plan.process(&fetcher).unwrap();
        assert_eq!(lines, vec!["||keep.example^"]);
    }

    #[test]
    fn test_process_surfaces_fetch_failure() {
        let plan = SourcePlan::new(&spec("missing.txt")).unwrap();
        let err = plan.process(&MemoryFetcher::new()).unwrap_err();
        assert!(matches!(err, Error::Fetch { source, .. } if source == "missing.txt"));
    }
}
