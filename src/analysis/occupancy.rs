// Released under MIT License.

//! Per-state occurrence counts, epoch occurrence tables, and the temporal
//! dominance classification of binding modes.

use hashbrown::HashMap;
use strum_macros::Display;

use super::sequence::StateId;
use crate::PANIC_MESSAGE;

/// Number of the most frequent binding modes for which the temporal dominance
/// classification is displayed in the diagrams.
pub(crate) const TOP_STATES: usize = 10;

/// Fraction of a state's occurrences that must fall into a single epoch for
/// the state to be classified as dominant in that epoch.
const DOMINANCE_FRACTION: f64 = 0.5;

/// One of the three contiguous partitions of the frame sequence.
/// The first epoch absorbs any remainder, so it is never shorter than the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Epoch {
    #[strum(serialize = "first third")]
    First,
    #[strum(serialize = "second third")]
    Second,
    #[strum(serialize = "final third")]
    Third,
}

impl Epoch {
    /// All epochs in time order.
    pub const ALL: [Epoch; 3] = [Epoch::First, Epoch::Second, Epoch::Third];

    #[inline(always)]
    fn index(&self) -> usize {
        match self {
            Epoch::First => 0,
            Epoch::Second => 1,
            Epoch::Third => 2,
        }
    }
}

/// Temporal dominance classification of a binding mode: in which part of the
/// trajectory does the mode predominantly occur?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TemporalClass {
    /// More than half of the occurrences fall into the first third of the frames.
    #[strum(serialize = "early-dominant")]
    Early,
    /// More than half of the occurrences fall into the second third of the frames.
    #[strum(serialize = "middle-dominant")]
    Middle,
    /// More than half of the occurrences fall into the final third of the frames.
    #[strum(serialize = "late-dominant")]
    Late,
    /// The mode occurs throughout the trajectory without a dominant epoch.
    #[strum(serialize = "uniform")]
    Uniform,
}

/// Occurrence counts of each binding mode across the whole sequence and within
/// each of the three epochs. Built once per analysis and read-only thereafter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateOccupancy {
    /// Total occurrence count of each state. The counts sum to the sequence length.
    total: HashMap<StateId, usize>,
    /// Occurrence counts restricted to each epoch, in time order.
    epochs: [HashMap<StateId, usize>; 3],
    /// Total number of frames in the sequence.
    n_frames: usize,
}

impl StateOccupancy {
    /// Count state occurrences over the whole sequence and within the three epochs.
    /// The first epoch covers the first `N / 3 + N % 3` frames, the remaining two
    /// epochs cover `N / 3` frames each.
    pub(crate) fn from_frames(frames: &[StateId]) -> Self {
        let n_frames = frames.len();
        let third = n_frames / 3;
        let first_len = third + n_frames % 3;

        let mut total = HashMap::new();
        let mut epochs: [HashMap<StateId, usize>; 3] = Default::default();

        for (i, &state) in frames.iter().enumerate() {
            *total.entry(state).or_insert(0) += 1;

            let epoch = if i < first_len {
                0
            } else if i < first_len + third {
                1
            } else {
                2
            };
            *epochs[epoch].entry(state).or_insert(0) += 1;
        }

        StateOccupancy {
            total,
            epochs,
            n_frames,
        }
    }

    /// Get the total number of frames in the analyzed sequence.
    #[inline(always)]
    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// Get the total occurrence count of a state, or 0 if the state never occurs.
    #[inline(always)]
    pub fn count(&self, state: StateId) -> usize {
        self.total.get(&state).copied().unwrap_or(0)
    }

    /// Get the occurrence count of a state restricted to the given epoch.
    #[inline(always)]
    pub fn epoch_count(&self, state: StateId, epoch: Epoch) -> usize {
        self.epochs[epoch.index()].get(&state).copied().unwrap_or(0)
    }

    /// Get the fraction of a state's total occurrences that fall into the given
    /// epoch. Panics if the state never occurs, which indicates an internal
    /// inconsistency: fractions are only defined for observed states.
    pub fn epoch_fraction(&self, state: StateId, epoch: Epoch) -> f64 {
        let total = self.count(state);
        if total == 0 {
            panic!(
                "FATAL MODEKIN ERROR | StateOccupancy::epoch_fraction | State with index '{}' has zero occurrences. {}",
                state.index(), PANIC_MESSAGE
            );
        }

        self.epoch_count(state, epoch) as f64 / total as f64
    }

    /// Get the percentage of all frames labeled with the given state.
    pub fn occurrence_percent(&self, state: StateId) -> f64 {
        if self.n_frames == 0 {
            return 0.0;
        }
        self.count(state) as f64 / self.n_frames as f64 * 100.0
    }

    /// Classify the temporal dominance of a state. The epochs are checked in
    /// time order and the first epoch holding more than half of the state's
    /// occurrences wins; a state without such an epoch is classified as uniform.
    pub fn classify(&self, state: StateId) -> TemporalClass {
        for (epoch, class) in Epoch::ALL.into_iter().zip([
            TemporalClass::Early,
            TemporalClass::Middle,
            TemporalClass::Late,
        ]) {
            if self.epoch_fraction(state, epoch) > DOMINANCE_FRACTION {
                return class;
            }
        }

        TemporalClass::Uniform
    }

    /// Get the states ranked by total occurrence count in decreasing order,
    /// truncated to the top `n`. Ties are broken by the order of first
    /// appearance in the sequence (lower state index first).
    pub fn top_states(&self, n: usize) -> Vec<StateId> {
        let mut states: Vec<StateId> = self.total.keys().copied().collect();
        states.sort_unstable();
        states.sort_by_key(|state| std::cmp::Reverse(self.count(*state)));
        states.truncate(n);
        states
    }

    /// Iterate over all observed states in an unspecified order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.total.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sequence::FrameLabels;
    use approx::assert_relative_eq;

    #[test]
    fn test_occupancy_totals() {
        let labels = FrameLabels::from_labels(["A", "A", "B", "B", "A", "C", "C", "C"]);
        let occupancy = StateOccupancy::from_frames(labels.frames());

        assert_eq!(occupancy.n_frames(), 8);
        assert_eq!(occupancy.count(StateId(0)), 3); // A
        assert_eq!(occupancy.count(StateId(1)), 2); // B
        assert_eq!(occupancy.count(StateId(2)), 3); // C
        assert_eq!(occupancy.count(StateId(7)), 0); // unknown state

        let total: usize = labels.states().map(|s| occupancy.count(s)).sum();
        assert_eq!(total, labels.n_frames());
    }

    #[test]
    fn test_occupancy_epoch_split() {
        // N = 8: first epoch gets 2 + 2 = 4 frames, the other two get 2 each
        let labels = FrameLabels::from_labels(["A", "A", "B", "B", "A", "C", "C", "C"]);
        let occupancy = StateOccupancy::from_frames(labels.frames());

        // epoch 1: A A B B
        assert_eq!(occupancy.epoch_count(StateId(0), Epoch::First), 2);
        assert_eq!(occupancy.epoch_count(StateId(1), Epoch::First), 2);
        assert_eq!(occupancy.epoch_count(StateId(2), Epoch::First), 0);

        // epoch 2: A C
        assert_eq!(occupancy.epoch_count(StateId(0), Epoch::Second), 1);
        assert_eq!(occupancy.epoch_count(StateId(2), Epoch::Second), 1);

        // epoch 3: C C
        assert_eq!(occupancy.epoch_count(StateId(2), Epoch::Third), 2);

        // per-state epoch counts sum to the total count
        for state in labels.states() {
            let epoch_sum: usize = Epoch::ALL
                .into_iter()
                .map(|e| occupancy.epoch_count(state, e))
                .sum();
            assert_eq!(epoch_sum, occupancy.count(state));
        }
    }

    #[test]
    fn test_occupancy_epoch_fractions_sum_to_one() {
        let labels = FrameLabels::from_labels(["A", "B", "C", "A", "B", "C", "A", "B", "C", "A"]);
        let occupancy = StateOccupancy::from_frames(labels.frames());

        for state in labels.states() {
            let fraction_sum: f64 = Epoch::ALL
                .into_iter()
                .map(|e| occupancy.epoch_fraction(state, e))
                .sum();
            assert_relative_eq!(fraction_sum, 1.0);
        }
    }

    #[test]
    fn test_occupancy_classification() {
        // B occurs only in the first epoch, C mostly in the final epoch,
        // A occurs throughout
        let labels = FrameLabels::from_labels([
            "B", "B", "A", "A", "A", "A", "C", "A", "C", "C", "C", "A",
        ]);
        let occupancy = StateOccupancy::from_frames(labels.frames());

        assert_eq!(occupancy.classify(StateId(0)), TemporalClass::Early); // B
        assert_eq!(occupancy.classify(StateId(2)), TemporalClass::Late); // C
        assert_eq!(occupancy.classify(StateId(1)), TemporalClass::Uniform); // A
    }

    #[test]
    fn test_occupancy_classification_middle() {
        let labels = FrameLabels::from_labels(["A", "A", "B", "B", "A", "A"]);
        let occupancy = StateOccupancy::from_frames(labels.frames());

        assert_eq!(occupancy.classify(StateId(1)), TemporalClass::Middle); // B
    }

    #[test]
    fn test_occupancy_classification_single_epoch_state() {
        // a state confined to the first epoch is classified early-dominant
        // no matter how rare it is
        let mut sequence = vec!["Rare"];
        sequence.extend(std::iter::repeat("Common").take(29));

        let labels = FrameLabels::from_labels(sequence);
        let occupancy = StateOccupancy::from_frames(labels.frames());

        assert_relative_eq!(occupancy.epoch_fraction(StateId(0), Epoch::First), 1.0);
        assert_eq!(occupancy.classify(StateId(0)), TemporalClass::Early);
    }

    #[test]
    fn test_occupancy_top_states() {
        let labels = FrameLabels::from_labels(["C", "A", "A", "B", "B", "B", "C"]);
        let occupancy = StateOccupancy::from_frames(labels.frames());

        // B has 3 occurrences; C and A are tied with 2, C appeared first
        let top = occupancy.top_states(10);
        assert_eq!(top, vec![StateId(2), StateId(0), StateId(1)]);

        let top = occupancy.top_states(2);
        assert_eq!(top, vec![StateId(2), StateId(0)]);
    }

    #[test]
    fn test_occupancy_empty() {
        let occupancy = StateOccupancy::from_frames(&[]);
        assert_eq!(occupancy.n_frames(), 0);
        assert_eq!(occupancy.top_states(10), Vec::<StateId>::new());
        assert_eq!(occupancy.occurrence_percent(StateId(0)), 0.0);
    }
}
