// Released under MIT License.

//! Force-directed layout of the threshold graph.

use petgraph::visit::EdgeRef;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::analysis::graph::ThresholdGraph;

/// Fixed seed for the initial node positions, making the layout (and thus the
/// rendered diagrams) reproducible across runs.
const LAYOUT_SEED: u64 = 42;

/// Number of relaxation iterations of the spring model.
const LAYOUT_ITERATIONS: usize = 100;

/// Scaling of the optimal edge length. Values above 1 spread the nodes apart,
/// leaving room for the node and edge labels.
const SPACING: f64 = 2.0;

/// Compute a 2D layout of the graph using a simplified Fruchterman-Reingold
/// spring model: repulsive forces between all node pairs, attractive forces
/// along edges, displacement capped by a cooling temperature.
///
/// Returns one `(x, y)` position per node in node-index order, with all
/// coordinates inside the unit square.
pub(super) fn spring_layout(graph: &ThresholdGraph) -> Vec<(f64, f64)> {
    let n_nodes = graph.n_nodes();
    if n_nodes == 0 {
        return Vec::new();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(LAYOUT_SEED);
    let mut positions: Vec<(f64, f64)> = (0..n_nodes)
        .map(|_| (rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();

    if n_nodes == 1 {
        positions[0] = (0.5, 0.5);
        return positions;
    }

    // adjacency ignoring direction and self-loops; parallel edges collapse
    let mut adjacency = vec![Vec::new(); n_nodes];
    for edge in graph.graph().edge_references() {
        let (i, j) = (edge.source().index(), edge.target().index());
        if i == j {
            continue;
        }
        if !adjacency[i].contains(&j) {
            adjacency[i].push(j);
            adjacency[j].push(i);
        }
    }

    let k = SPACING * (1.0 / n_nodes as f64).sqrt();
    let mut temperature = 0.1;

    for _ in 0..LAYOUT_ITERATIONS {
        let mut forces = vec![(0.0f64, 0.0f64); n_nodes];

        // repulsion between all pairs
        for i in 0..n_nodes {
            for j in (i + 1)..n_nodes {
                let dx = positions[j].0 - positions[i].0;
                let dy = positions[j].1 - positions[i].1;
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);

                let repulsion = k * k / dist;
                let fx = dx / dist * repulsion;
                let fy = dy / dist * repulsion;

                forces[i].0 -= fx;
                forces[i].1 -= fy;
                forces[j].0 += fx;
                forces[j].1 += fy;
            }
        }

        // attraction along edges
        for (i, neighbors) in adjacency.iter().enumerate() {
            for &j in neighbors {
                if i >= j {
                    continue;
                }

                let dx = positions[j].0 - positions[i].0;
                let dy = positions[j].1 - positions[i].1;
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);

                let attraction = dist * dist / k;
                let fx = dx / dist * attraction;
                let fy = dy / dist * attraction;

                forces[i].0 += fx;
                forces[i].1 += fy;
                forces[j].0 -= fx;
                forces[j].1 -= fy;
            }
        }

        // displace with temperature cooling
        for i in 0..n_nodes {
            let magnitude = (forces[i].0 * forces[i].0 + forces[i].1 * forces[i].1)
                .sqrt()
                .max(0.01);
            let displacement = magnitude.min(temperature);

            positions[i].0 = (positions[i].0 + forces[i].0 / magnitude * displacement)
                .clamp(0.0, 1.0);
            positions[i].1 = (positions[i].1 + forces[i].1 / magnitude * displacement)
                .clamp(0.0, 1.0);
        }

        temperature *= 0.95;
    }

    positions
}
