//! Driver settings.
//!
//! Each setting has a name, a default and an accepted range. Values come from
//! the command line, which clap backs with the `DIGRAPH_*` environment
//! variables; anything unset falls back to the default.

use anyhow::{bail, Result};
use digraph_core::{VertexId, MAX_VERTEX_BOUND};

use crate::OutputFormat;

/// A registered integer setting.
pub struct IntSetting {
    pub name: &'static str,
    pub description: &'static str,
    pub default: i64,
    pub min: i64,
    pub max: i64,
}

impl IntSetting {
    /// Apply the default and check the range.
    pub fn resolve(&self, value: Option<i64>) -> Result<i64> {
        let value = value.unwrap_or(self.default);
        if value < self.min || value > self.max {
            bail!(
                "{} must be between {} and {}, got {} ({})",
                self.name,
                self.min,
                self.max,
                value,
                self.description
            );
        }
        Ok(value)
    }
}

pub static SOURCE: IntSetting = IntSetting {
    name: "source",
    description: "vertex the best-path search starts from",
    default: 0,
    min: 0,
    max: MAX_VERTEX_BOUND as i64 - 1,
};

pub static MAX_BOUND: IntSetting = IntSetting {
    name: "max_bound",
    description: "largest dense matrix the best-path search may build",
    default: MAX_VERTEX_BOUND as i64,
    min: 1,
    max: MAX_VERTEX_BOUND as i64,
};

/// Resolved driver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: VertexId,
    /// Explicit best-path bound; `None` means "size of the graph".
    pub bound: Option<usize>,
    pub max_bound: usize,
    pub format: OutputFormat,
}

impl Settings {
    pub fn resolve(
        source: Option<i64>,
        bound: Option<i64>,
        max_bound: Option<i64>,
        format: OutputFormat,
    ) -> Result<Self> {
        let source = SOURCE.resolve(source)?;
        let max_bound = MAX_BOUND.resolve(max_bound)?;

        let bound = match bound {
            Some(b) if b < 1 => bail!("bound must be at least 1, got {b}"),
            Some(b) if b > max_bound => {
                bail!("bound {b} exceeds max_bound {max_bound}")
            }
            Some(b) => Some(b as usize),
            None => None,
        };

        Ok(Self {
            source: source as VertexId,
            bound,
            max_bound: max_bound as usize,
            format,
        })
    }

    /// Bound for a best-path run over a graph of `vertex_count` vertices.
    pub fn bound_for(&self, vertex_count: usize) -> usize {
        self.bound
            .unwrap_or(vertex_count)
            .clamp(1, self.max_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::resolve(None, None, None, OutputFormat::Text).unwrap();
        assert_eq!(s.source, 0);
        assert_eq!(s.bound, None);
        assert_eq!(s.max_bound, MAX_VERTEX_BOUND);
    }

    #[test]
    fn test_bound_follows_graph_size() {
        let s = Settings::resolve(None, None, Some(10), OutputFormat::Text).unwrap();
        assert_eq!(s.bound_for(4), 4);
        assert_eq!(s.bound_for(50), 10);
        assert_eq!(s.bound_for(0), 1);
    }

    #[test]
    fn test_explicit_bound() {
        let s = Settings::resolve(Some(2), Some(6), None, OutputFormat::Json).unwrap();
        assert_eq!(s.source, 2);
        assert_eq!(s.bound_for(80), 6);
        assert_eq!(s.format, OutputFormat::Json);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Settings::resolve(Some(-1), None, None, OutputFormat::Text).is_err());
        assert!(Settings::resolve(None, None, Some(101), OutputFormat::Text).is_err());
        assert!(Settings::resolve(None, None, Some(0), OutputFormat::Text).is_err());
        assert!(Settings::resolve(None, Some(0), None, OutputFormat::Text).is_err());
        assert!(Settings::resolve(None, Some(20), Some(10), OutputFormat::Text).is_err());
    }

    #[test]
    fn test_error_names_setting() {
        let err = MAX_BOUND.resolve(Some(500)).unwrap_err();
        assert!(err.to_string().contains("max_bound"));
    }
}
