//! Text weight-matrix ingestion.
//!
//! Each non-blank line is one row of integers separated by whitespace,
//! commas or semicolons. Row `i`, column `j` becomes the weight of edge
//! `i -> j` when fed to [`Graph::populate`](crate::Graph::populate).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::adjacency::Weight;
use crate::error::{GraphError, GraphResult};

/// A weight matrix flattened row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightMatrix {
    pub weights: Vec<Weight>,
    /// Number of non-blank lines.
    pub rows: usize,
    /// Number of values on the last non-blank line only. Earlier rows of a
    /// different length are not reflected here.
    pub cols: usize,
}

impl WeightMatrix {
    /// Number of vertices a graph built from this matrix needs.
    pub fn vertex_count(&self) -> usize {
        self.rows.max(self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == ';'
}

/// Parse a weight matrix from any buffered reader.
pub fn read_matrix<R: BufRead>(reader: R) -> GraphResult<WeightMatrix> {
    let mut matrix = WeightMatrix::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let mut cols = 0;
        for token in line.split(is_separator).filter(|t| !t.is_empty()) {
            let weight: Weight = token.parse().map_err(|_| GraphError::Parse {
                line: index + 1,
                token: token.to_string(),
            })?;
            matrix.weights.push(weight);
            cols += 1;
        }
        if cols > 0 {
            matrix.rows += 1;
            matrix.cols = cols;
        }
    }

    Ok(matrix)
}

/// Parse a weight matrix from a text file.
pub fn read_matrix_file<P: AsRef<Path>>(path: P) -> GraphResult<WeightMatrix> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let matrix = read_matrix(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        rows = matrix.rows,
        cols = matrix.cols,
        values = matrix.weights.len(),
        "read weight matrix"
    );
    Ok(matrix)
}
