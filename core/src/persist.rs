//! Binary graph file format.
//!
//! Every field is a little-endian `i32`:
//!
//! ```text
//! vertex_count
//! vertex_count x { id, adjacency_count,
//!                  adjacency_count x { origin_id, target_id, weight } }
//! ```
//!
//! Vertices appear in ascending id order and edges in insertion order. The
//! leading count is written by [`encode`] and required by [`decode`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::adjacency::VertexId;
use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::vertex::Vertex;

fn write_i32<W: Write>(writer: &mut W, value: i32) -> GraphResult<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn read_i32<R: Read>(reader: &mut R) -> GraphResult<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn count_field(value: usize, what: &str) -> GraphResult<i32> {
    i32::try_from(value)
        .map_err(|_| GraphError::InvalidArgument(format!("{what} {value} does not fit in i32")))
}

fn read_count<R: Read>(reader: &mut R, what: &str) -> GraphResult<usize> {
    let value = read_i32(reader)?;
    usize::try_from(value).map_err(|_| GraphError::Corrupt(format!("negative {what}: {value}")))
}

/// Write `graph` to `writer`.
pub fn encode<W: Write>(graph: &Graph, writer: &mut W) -> GraphResult<()> {
    write_i32(writer, count_field(graph.vertex_count(), "vertex count")?)?;
    for vertex in graph.vertices() {
        write_i32(writer, vertex.id())?;
        write_i32(writer, count_field(vertex.out_degree(), "adjacency count")?)?;
        for edge in vertex.edges() {
            write_i32(writer, vertex.id())?;
            write_i32(writer, edge.target)?;
            write_i32(writer, edge.weight)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read a graph from `reader`.
///
/// The returned graph's declared capacity is the stored vertex count (at
/// least 1). Nothing is returned on failure; partially read state is dropped.
pub fn decode<R: Read>(reader: &mut R) -> GraphResult<Graph> {
    let vertex_count = read_count(reader, "vertex count")?;
    let mut graph = Graph::new(vertex_count.max(1))?;

    for _ in 0..vertex_count {
        let id: VertexId = read_i32(reader)?;
        let adjacency_count = read_count(reader, "adjacency count")?;

        let mut vertex = Vertex::new(id);
        for _ in 0..adjacency_count {
            let origin = read_i32(reader)?;
            let target = read_i32(reader)?;
            let weight = read_i32(reader)?;
            if origin != id {
                return Err(GraphError::Corrupt(format!(
                    "edge record origin {origin} stored under vertex {id}"
                )));
            }
            vertex.edges_mut().insert(target, weight);
        }
        graph.insert_vertex(vertex)?;
    }

    if let Some((origin, target, _)) = graph.edges().find(|&(_, t, _)| !graph.exists(t)) {
        return Err(GraphError::Corrupt(format!(
            "edge {origin} -> {target} targets a missing vertex"
        )));
    }

    Ok(graph)
}

/// Save `graph` to a file, replacing any existing content.
pub fn save<P: AsRef<Path>>(graph: &Graph, path: P) -> GraphResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode(graph, &mut writer)?;
    debug!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "saved graph"
    );
    Ok(())
}

/// Load a graph previously written by [`save`].
pub fn load<P: AsRef<Path>>(path: P) -> GraphResult<Graph> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let graph = decode(&mut reader)?;
    debug!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}
