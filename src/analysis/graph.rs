// Released under MIT License.

//! Construction of the per-threshold directed graph of binding-mode transitions.

use getset::{CopyGetters, Getters};
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::probability::TransitionProbabilities;
use super::sequence::{StateId, StatePair};
use crate::PANIC_MESSAGE;

/// Category of an edge in the threshold graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeKind {
    /// A transition whose global frequency independently met the threshold.
    Retained,
    /// The reverse direction of a retained transition, inserted unconditionally
    /// so the diagram shows bidirectional kinetics even when only one direction
    /// clears the threshold. Its weight may be below the threshold (or zero).
    Reverse,
    /// A self-loop whose global frequency met the threshold.
    SelfLoop,
}

/// An edge of the threshold graph: a transition together with its global
/// frequency (in percent of all frames).
#[derive(Debug, Clone, Copy, CopyGetters)]
pub(crate) struct ModeEdge {
    /// Global frequency of the transition in percent.
    #[getset(get_copy = "pub(crate)")]
    weight: f64,
    /// Category of the edge.
    #[getset(get_copy = "pub(crate)")]
    kind: EdgeKind,
}

/// Directed graph of binding-mode transitions filtered by a minimum-transition
/// threshold. Rebuilt fresh for every threshold of the ladder and discarded
/// after its diagram is rendered; never mutated after construction.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub(crate) struct ThresholdGraph {
    /// The underlying directed graph. Node weights are state identifiers.
    #[getset(get = "pub(crate)")]
    graph: DiGraph<StateId, ModeEdge>,
    /// The minimum-transition threshold this graph was built for (percent).
    #[getset(get_copy = "pub(crate)")]
    threshold: f64,
}

impl ThresholdGraph {
    /// Build the graph for the given threshold. Transitions whose global
    /// frequency reaches the threshold are added together with their reverse
    /// direction; self-loops are added when their own frequency reaches the
    /// threshold. Nodes exist only for states touched by at least one edge.
    ///
    /// Construction is deterministic: transitions are processed in the order
    /// of their state indices, so node order (and thus diagram layout) is
    /// reproducible across runs.
    pub(crate) fn build(threshold: f64, probabilities: &TransitionProbabilities) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<StateId, NodeIndex> = HashMap::new();
        let mut edges: HashMap<StatePair, EdgeIndex> = HashMap::new();

        let mut transitions: Vec<(StatePair, f64)> = probabilities
            .global()
            .iter()
            .map(|(&pair, &frequency)| (pair, frequency))
            .collect();
        transitions.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (pair, frequency) in transitions {
            if frequency < threshold {
                continue;
            }

            add_or_update_edge(
                &mut graph,
                &mut nodes,
                &mut edges,
                pair,
                ModeEdge {
                    weight: frequency,
                    kind: EdgeKind::Retained,
                },
            );

            // the reverse edge never downgrades an independently retained edge
            let reverse = pair.reversed();
            if !edges.contains_key(&reverse) {
                add_or_update_edge(
                    &mut graph,
                    &mut nodes,
                    &mut edges,
                    reverse,
                    ModeEdge {
                        weight: probabilities.global_or_zero(&reverse),
                        kind: EdgeKind::Reverse,
                    },
                );
            }
        }

        let mut self_loops: Vec<(StateId, f64)> = probabilities
            .self_loop_occurrence()
            .iter()
            .map(|(&state, &occurrence)| (state, occurrence))
            .collect();
        self_loops.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (state, occurrence) in self_loops {
            if occurrence < threshold {
                continue;
            }

            add_or_update_edge(
                &mut graph,
                &mut nodes,
                &mut edges,
                StatePair::new(state, state),
                ModeEdge {
                    weight: occurrence,
                    kind: EdgeKind::SelfLoop,
                },
            );
        }

        ThresholdGraph { graph, threshold }
    }

    /// Number of nodes in the graph.
    pub(crate) fn n_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges in the graph (including reverse-inserted edges and self-loops).
    pub(crate) fn n_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over the non-self-loop edges that independently met the threshold.
    pub(crate) fn retained_edges(&self) -> impl Iterator<Item = StatePair> + '_ {
        self.graph.edge_references().filter_map(|edge| {
            (edge.weight().kind() == EdgeKind::Retained).then(|| {
                StatePair::new(
                    *self.graph.node_weight(edge.source()).expect(PANIC_MESSAGE),
                    *self.graph.node_weight(edge.target()).expect(PANIC_MESSAGE),
                )
            })
        })
    }

    /// Does the node have at least one incident edge (in either direction)
    /// whose weight reaches the threshold? Node statistics are only displayed
    /// for such nodes.
    pub(crate) fn has_significant_edge(&self, node: NodeIndex) -> bool {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .chain(self.graph.edges_directed(node, Direction::Incoming))
            .any(|edge| edge.weight().weight() >= self.threshold)
    }
}

/// Insert an edge between the given states, creating the endpoint nodes if
/// needed. An existing edge is overwritten only when the new edge is not an
/// auxiliary reverse edge.
fn add_or_update_edge(
    graph: &mut DiGraph<StateId, ModeEdge>,
    nodes: &mut HashMap<StateId, NodeIndex>,
    edges: &mut HashMap<StatePair, EdgeIndex>,
    pair: StatePair,
    edge: ModeEdge,
) {
    let from = *nodes
        .entry(pair.from())
        .or_insert_with(|| graph.add_node(pair.from()));
    let to = *nodes
        .entry(pair.to())
        .or_insert_with(|| graph.add_node(pair.to()));

    match edges.get(&pair) {
        Some(&index) => {
            if edge.kind() != EdgeKind::Reverse {
                *graph.edge_weight_mut(index).expect(PANIC_MESSAGE) = edge;
            }
        }
        None => {
            let index = graph.add_edge(from, to, edge);
            edges.insert(pair, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::counts::TransitionCounts;
    use crate::analysis::occupancy::StateOccupancy;
    use crate::analysis::sequence::FrameLabels;
    use approx::assert_relative_eq;

    fn probabilities_for(sequence: &[&str]) -> TransitionProbabilities {
        let labels = FrameLabels::from_labels(sequence.iter().copied());
        let counts = TransitionCounts::from_frames(labels.frames());
        let occupancy = StateOccupancy::from_frames(labels.frames());
        TransitionProbabilities::compute(&counts, &occupancy, &labels)
    }

    fn find_edge(graph: &ThresholdGraph, from: usize, to: usize) -> Option<ModeEdge> {
        graph.graph().edge_references().find_map(|edge| {
            let source = *graph.graph().node_weight(edge.source()).unwrap();
            let target = *graph.graph().node_weight(edge.target()).unwrap();
            (source == StateId(from) && target == StateId(to)).then(|| *edge.weight())
        })
    }

    #[test]
    fn test_graph_retains_and_reverses() {
        // A A B B A C C C: each transition is 12.5% of frames
        let probabilities = probabilities_for(&["A", "A", "B", "B", "A", "C", "C", "C"]);
        let graph = ThresholdGraph::build(10.0, &probabilities);

        // A -> B and B -> A both independently meet the threshold
        let ab = find_edge(&graph, 0, 1).unwrap();
        assert_eq!(ab.kind(), EdgeKind::Retained);
        assert_relative_eq!(ab.weight(), 12.5);

        let ba = find_edge(&graph, 1, 0).unwrap();
        assert_eq!(ba.kind(), EdgeKind::Retained);
        assert_relative_eq!(ba.weight(), 12.5);

        // A -> C is retained; C -> A never occurred but is inserted with zero weight
        let ac = find_edge(&graph, 0, 2).unwrap();
        assert_eq!(ac.kind(), EdgeKind::Retained);

        let ca = find_edge(&graph, 2, 0).unwrap();
        assert_eq!(ca.kind(), EdgeKind::Reverse);
        assert_relative_eq!(ca.weight(), 0.0);

        // self-loops: A and B at 12.5%, C at 25%
        assert_eq!(find_edge(&graph, 0, 0).unwrap().kind(), EdgeKind::SelfLoop);
        assert_eq!(find_edge(&graph, 2, 2).unwrap().kind(), EdgeKind::SelfLoop);

        assert_eq!(graph.n_nodes(), 3);
        assert_eq!(graph.n_edges(), 7);
    }

    #[test]
    fn test_graph_threshold_filters_edges() {
        let probabilities = probabilities_for(&["A", "A", "B", "B", "A", "C", "C", "C"]);

        // only the C self-loop (25%) survives a 20% threshold
        let graph = ThresholdGraph::build(20.0, &probabilities);
        assert_eq!(graph.n_nodes(), 1);
        assert_eq!(graph.n_edges(), 1);
        assert_eq!(find_edge(&graph, 2, 2).unwrap().kind(), EdgeKind::SelfLoop);

        // nothing survives a 30% threshold
        let graph = ThresholdGraph::build(30.0, &probabilities);
        assert_eq!(graph.n_nodes(), 0);
        assert_eq!(graph.n_edges(), 0);
    }

    #[test]
    fn test_graph_threshold_monotonicity() {
        let sequence = [
            "A", "B", "A", "B", "A", "A", "C", "C", "A", "B", "C", "A", "A", "B", "B", "C",
        ];
        let probabilities = probabilities_for(&sequence);

        let coarse = ThresholdGraph::build(5.0, &probabilities);
        let fine = ThresholdGraph::build(15.0, &probabilities);

        let coarse_retained: Vec<StatePair> = coarse.retained_edges().collect();
        for pair in fine.retained_edges() {
            assert!(coarse_retained.contains(&pair));
        }
    }

    #[test]
    fn test_graph_empty_probabilities() {
        let probabilities = probabilities_for(&[]);
        let graph = ThresholdGraph::build(1.0, &probabilities);

        assert_eq!(graph.n_nodes(), 0);
        assert_eq!(graph.n_edges(), 0);
    }

    #[test]
    fn test_graph_significant_edge_detection() {
        let probabilities = probabilities_for(&["A", "A", "B", "B", "A", "C", "C", "C"]);
        let graph = ThresholdGraph::build(10.0, &probabilities);

        // every node touches at least one edge at or above 10%
        for node in graph.graph().node_indices() {
            assert!(graph.has_significant_edge(node));
        }
    }
}
