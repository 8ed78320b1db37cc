// Released under MIT License.

//! Tabulation of directed transition counts and self-loop counts.

use getset::Getters;
use hashbrown::HashMap;

use super::sequence::{StateId, StatePair};

/// Counts of directed transitions between binding modes and of self-loops
/// (adjacent frames sharing the same mode). Built once per analysis by a single
/// linear scan over the frame sequence and read-only thereafter.
///
/// For a non-empty sequence of N frames, the sum of all transition counts and
/// all self-loop counts equals N - 1.
#[derive(Debug, Clone, Default, PartialEq, Getters)]
pub struct TransitionCounts {
    /// Number of occurrences of each directed transition (source != destination).
    #[getset(get = "pub")]
    transitions: HashMap<StatePair, usize>,

    /// Number of adjacent-frame pairs where both frames share the same mode.
    #[getset(get = "pub")]
    self_loops: HashMap<StateId, usize>,
}

impl TransitionCounts {
    /// Scan the frame sequence and tabulate transition and self-loop counts.
    /// Sequences with fewer than two frames yield empty tables.
    pub(crate) fn from_frames(frames: &[StateId]) -> Self {
        let mut transitions = HashMap::new();
        let mut self_loops = HashMap::new();

        for window in frames.windows(2) {
            let (current, next) = (window[0], window[1]);

            if current == next {
                *self_loops.entry(current).or_insert(0) += 1;
            } else {
                *transitions.entry(StatePair::new(current, next)).or_insert(0) += 1;
            }
        }

        TransitionCounts {
            transitions,
            self_loops,
        }
    }

    /// Get the number of occurrences of a directed transition, or 0 if the
    /// transition was never observed.
    #[inline(always)]
    pub fn transition_count(&self, pair: &StatePair) -> usize {
        self.transitions.get(pair).copied().unwrap_or(0)
    }

    /// Get the number of self-loops of a state, or 0 if the state never
    /// persisted across adjacent frames.
    #[inline(always)]
    pub fn self_loop_count(&self, state: StateId) -> usize {
        self.self_loops.get(&state).copied().unwrap_or(0)
    }

    /// Total number of tabulated events (transitions plus self-loops).
    /// Equals N - 1 for a non-empty sequence of N frames.
    pub fn n_events(&self) -> usize {
        self.transitions.values().sum::<usize>() + self.self_loops.values().sum::<usize>()
    }
}
