// Released under MIT License.

//! Derivation of transition probabilities from the tabulated counts.

use getset::Getters;
use hashbrown::HashMap;

use super::counts::TransitionCounts;
use super::occupancy::StateOccupancy;
use super::sequence::{FrameLabels, StateId, StatePair};
use crate::PANIC_MESSAGE;

/// Probability views derived from the transition and self-loop counts.
/// Computed once per analysis; the per-threshold diagrams only filter these
/// values, they never recompute them.
///
/// The global frequency of a transition answers "how common is this transition
/// relative to the whole trajectory", while the conditional probabilities
/// answer "how likely is this transition given that the system currently
/// occupies the source (or destination) mode". Both readings are shown on the
/// rendered edges because they answer different questions.
#[derive(Debug, Clone, Default, PartialEq, Getters)]
pub struct TransitionProbabilities {
    /// Percentage of all frames accounted for by each observed transition.
    #[getset(get = "pub")]
    global: HashMap<StatePair, f64>,

    /// Conditional probability P(next = v | current = u) in percent,
    /// keyed by the pair (u, v).
    #[getset(get = "pub")]
    forward: HashMap<StatePair, f64>,

    /// Conditional probability P(previous = u | current = v) in percent,
    /// keyed by the reversed pair (v, u).
    #[getset(get = "pub")]
    backward: HashMap<StatePair, f64>,

    /// Probability that a state persists to the next frame, as a fraction of
    /// the state's occurrences. Callers scale to percent as needed.
    #[getset(get = "pub")]
    self_loop_probability: HashMap<StateId, f64>,

    /// Percentage of all frames accounted for by each state's self-loops.
    #[getset(get = "pub")]
    self_loop_occurrence: HashMap<StateId, f64>,
}

impl TransitionProbabilities {
    /// Compute all probability views from the tabulated counts.
    ///
    /// Any state appearing as a transition endpoint is guaranteed to occur at
    /// least once in the sequence; a zero occurrence count encountered here is
    /// an invariant violation and panics loudly.
    pub(crate) fn compute(
        counts: &TransitionCounts,
        occupancy: &StateOccupancy,
        labels: &FrameLabels,
    ) -> Self {
        let n_frames = occupancy.n_frames();

        let mut global = HashMap::new();
        let mut forward = HashMap::new();
        let mut backward = HashMap::new();

        for (&pair, &count) in counts.transitions() {
            let frequency = count as f64 / n_frames as f64 * 100.0;
            let forward_probability =
                count as f64 / checked_occurrences(occupancy, pair.from()) as f64 * 100.0;
            let backward_probability =
                count as f64 / checked_occurrences(occupancy, pair.to()) as f64 * 100.0;

            log::trace!(
                "transition {}: {:.4}% of frames, forward {:.4}%, backward {:.4}%",
                labels.describe_pair(&pair),
                frequency,
                forward_probability,
                backward_probability,
            );

            global.insert(pair, frequency);
            forward.insert(pair, forward_probability);
            backward.insert(pair.reversed(), backward_probability);
        }

        let mut self_loop_probability = HashMap::new();
        let mut self_loop_occurrence = HashMap::new();

        for (&state, &count) in counts.self_loops() {
            let probability = count as f64 / checked_occurrences(occupancy, state) as f64;
            let occurrence = count as f64 / n_frames as f64 * 100.0;

            log::trace!(
                "self-loop {}: {:.4}% of frames, probability {:.4}",
                labels.state_name(state),
                occurrence,
                probability,
            );

            self_loop_probability.insert(state, probability);
            self_loop_occurrence.insert(state, occurrence);
        }

        TransitionProbabilities {
            global,
            forward,
            backward,
            self_loop_probability,
            self_loop_occurrence,
        }
    }

    /// Get the global frequency of a transition in percent, defaulting to 0 if
    /// the transition was never observed. The default covers reverse directions
    /// of retained edges that never occurred themselves.
    #[inline(always)]
    pub fn global_or_zero(&self, pair: &StatePair) -> f64 {
        self.global.get(pair).copied().unwrap_or(0.0)
    }

    /// Get the forward conditional probability of a transition in percent,
    /// defaulting to 0 for unobserved transitions.
    #[inline(always)]
    pub fn forward_or_zero(&self, pair: &StatePair) -> f64 {
        self.forward.get(pair).copied().unwrap_or(0.0)
    }

    /// Get the backward conditional probability in percent for the reversed-pair
    /// key, defaulting to 0 for unobserved transitions.
    #[inline(always)]
    pub fn backward_or_zero(&self, pair: &StatePair) -> f64 {
        self.backward.get(pair).copied().unwrap_or(0.0)
    }

    /// Get the self-loop probability of a state as a fraction, defaulting to 0.
    #[inline(always)]
    pub fn self_loop_probability_or_zero(&self, state: StateId) -> f64 {
        self.self_loop_probability
            .get(&state)
            .copied()
            .unwrap_or(0.0)
    }

    /// Get the self-loop occurrence of a state in percent, defaulting to 0.
    #[inline(always)]
    pub fn self_loop_occurrence_or_zero(&self, state: StateId) -> f64 {
        self.self_loop_occurrence
            .get(&state)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Get the occurrence count of a state, panicking if it is zero.
fn checked_occurrences(occupancy: &StateOccupancy, state: StateId) -> usize {
    let count = occupancy.count(state);
    if count == 0 {
        panic!(
            "FATAL MODEKIN ERROR | probability::checked_occurrences | State with index '{}' is a transition endpoint but has zero occurrences. {}",
            state.index(), PANIC_MESSAGE
        );
    }
    count
}
