use digraph_core::{
    best_path, count_simple_paths, is_reachable, persist, Graph, GraphResult, VertexId, Weight,
    MAX_VERTEX_BOUND,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Graph size for the simple-path counting run. Counting is exponential in
/// the worst case, so this stays tiny regardless of `vertex_count`.
const PATH_COUNT_SIZE: u64 = 14;

type Generator = fn(u64) -> GraphResult<Graph>;

fn main() -> GraphResult<()> {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: digraph-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  layered     Layered DAG, every edge points one layer down");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  random      Erdos-Renyi uniform random edges with mixed-sign weights");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default vertex_count: 10000");
        println!("Traversals recurse once per path vertex; very deep graphs need a larger stack.");
        return Ok(());
    }

    println!("digraph-bench");
    println!("=============");
    println!();

    let generators: Vec<(&str, Generator)> = match mode {
        "layered" => vec![("Layered DAG", gen_layered)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("Layered DAG", gen_layered as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Erdos-Renyi random", gen_random),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return Ok(());
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, vertex_count)?;
    }
    Ok(())
}

fn ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: Generator, vertex_count: u64) -> GraphResult<()> {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let graph = generator(vertex_count)?;
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s, {} vertices, {} edges, ~{:.1}MB",
        gen_time.as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // Reachability in both directions between the first and last vertex
    let last = graph.vertex_ids().last().unwrap_or(0);
    println!();
    println!("{:>8} {:>8} {:>10} {:>10}", "from", "to", "reachable", "time");
    println!("{:->8} {:->8} {:->10} {:->10}", "", "", "", "");
    for (from, to) in [(0, last), (last, 0)] {
        let t = Instant::now();
        let reachable = is_reachable(&graph, from, to);
        println!(
            "{:>8} {:>8} {:>10} {:>8.1}ms",
            from,
            to,
            reachable,
            ms(t.elapsed())
        );
    }

    // Persistence round trip through memory
    println!();
    let t = Instant::now();
    let mut buf = Vec::new();
    persist::encode(&graph, &mut buf)?;
    let encode_time = t.elapsed();
    let t = Instant::now();
    let loaded = persist::decode(&mut buf.as_slice())?;
    let decode_time = t.elapsed();
    println!(
        "Encoded {} bytes in {:.1}ms, decoded {} vertices in {:.1}ms",
        buf.len(),
        ms(encode_time),
        loaded.vertex_count(),
        ms(decode_time)
    );

    // Dense best-path search on a graph that fits the matrix bound
    let small = generator(MAX_VERTEX_BOUND as u64)?;
    let bound = small.vertex_count().min(MAX_VERTEX_BOUND);
    let t = Instant::now();
    let best = best_path(&small, bound, 0)?;
    let elapsed = t.elapsed();
    let reached = best.distance.iter().filter(|d| d.is_some()).count();
    let heaviest = best.distance.iter().flatten().max().copied().unwrap_or(0);
    println!(
        "Best path over {} vertices: {} reached, max weight {} in {:.2}ms",
        bound,
        reached,
        heaviest,
        ms(elapsed)
    );

    // Exhaustive simple-path enumeration on a tiny instance
    let tiny = generator(PATH_COUNT_SIZE)?;
    let tiny_last = tiny.vertex_ids().last().unwrap_or(0);
    let (from, to) = if is_reachable(&tiny, 0, tiny_last) {
        (0, tiny_last)
    } else {
        (tiny_last, 0)
    };
    let t = Instant::now();
    let paths = count_simple_paths(&tiny, from, to);
    println!(
        "Simple paths {} -> {} over {} vertices: {} in {:.2}ms",
        from,
        to,
        tiny.vertex_count(),
        paths,
        ms(t.elapsed())
    );
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    /// Non-zero weight in `1..=max`.
    fn weight(&mut self, max: u64) -> Weight {
        (self.next(max) + 1) as Weight
    }
}

fn id(n: u64) -> VertexId {
    n as VertexId
}

/// Graph with vertices `0..vertex_count` and no edges.
fn with_vertices(vertex_count: u64) -> GraphResult<Graph> {
    let mut graph = Graph::new(vertex_count.max(1) as usize)?;
    for i in 0..vertex_count {
        graph.add_vertex(id(i))?;
    }
    Ok(graph)
}

/// Layered DAG: vertices split into layers of `width`, each vertex linking to
/// three vertices in the next layer.
///
/// No cycles, so best-path labels are exact. Path counts grow with depth.
fn gen_layered(vertex_count: u64) -> GraphResult<Graph> {
    let width = 4u64;
    let mut graph = with_vertices(vertex_count)?;
    let mut rng = FastRng::new(42);

    for v in 0..vertex_count {
        let next_layer = (v / width + 1) * width;
        for _ in 0..3 {
            let target = next_layer + rng.next(width);
            if target < vertex_count {
                graph.insert_edge(id(v), id(target), rng.weight(20))?;
            }
        }
    }

    Ok(graph)
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge and connecting
/// to one of its endpoints. Vertices with more edges are more likely to be picked.
fn gen_scale_free(vertex_count: u64) -> GraphResult<Graph> {
    let edges_per_vertex = 3u64;
    let mut graph = with_vertices(vertex_count)?;
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<u64> = Vec::with_capacity((vertex_count * edges_per_vertex * 2) as usize);

    // Seed: small clique
    let seed = 4u64.min(vertex_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            graph.insert_edge(id(i), id(j), rng.weight(10))?;
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_vertex in seed..vertex_count {
        if endpoints.is_empty() {
            endpoints.push(0);
        }
        let attach = edges_per_vertex.min(new_vertex);
        for _ in 0..attach {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_vertex {
                graph.insert_edge(id(target), id(new_vertex), rng.weight(10))?;
                endpoints.push(new_vertex);
                endpoints.push(target);
            }
        }
    }

    Ok(graph)
}

/// Erdos-Renyi: uniform random edges, about three per vertex.
///
/// Weights are drawn from `-10..=10` without zero, so cycles of either sign
/// appear. Baseline topology with no structure.
fn gen_random(vertex_count: u64) -> GraphResult<Graph> {
    let target_edges = vertex_count * 3;
    let mut graph = with_vertices(vertex_count)?;
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(vertex_count);
        let to = rng.next(vertex_count);
        if from != to {
            let magnitude = rng.weight(10);
            let weight = if rng.next(2) == 0 { magnitude } else { -magnitude };
            graph.insert_edge(id(from), id(to), weight)?;
        }
    }

    Ok(graph)
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new vertex is reached from a random recent "surface" vertex, with
/// occasional shortcuts from older vertices. Produces tree-like topology with
/// winding paths away from vertex 0.
fn gen_dla(vertex_count: u64) -> GraphResult<Graph> {
    let mut graph = with_vertices(vertex_count)?;
    let mut rng = FastRng::new(77777);

    let surface_max = 1000usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_vertex in 1..vertex_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        graph.insert_edge(id(attach_to), id(new_vertex), rng.weight(5))?;

        // 10% chance of a second connection
        if rng.next(10) == 0 && new_vertex > 1 {
            let other = rng.next(new_vertex);
            if other != attach_to {
                graph.insert_edge(id(other), id(new_vertex), rng.weight(5))?;
            }
        }

        surface.push_back(new_vertex);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    Ok(graph)
}
