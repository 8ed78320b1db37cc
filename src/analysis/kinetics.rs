// Released under MIT License.

//! The per-run analysis context holding all tables derived from the frame sequence.

use getset::Getters;

use super::counts::TransitionCounts;
use super::occupancy::StateOccupancy;
use super::probability::TransitionProbabilities;
use super::sequence::FrameLabels;

/// All tables derived from a frame label sequence: transition and self-loop
/// counts, state occupancy (total and per epoch), and the probability views.
///
/// Constructed once per analysis run and treated as immutable afterwards.
/// The per-threshold graphs and diagrams only read from this context.
#[derive(Debug, Clone, Getters)]
pub struct ModeKinetics {
    /// The analyzed frame label sequence.
    #[getset(get = "pub")]
    labels: FrameLabels,

    /// Directed transition counts and self-loop counts.
    #[getset(get = "pub")]
    counts: TransitionCounts,

    /// State occurrence counts, total and per epoch.
    #[getset(get = "pub")]
    occupancy: StateOccupancy,

    /// Probability views derived from the counts.
    #[getset(get = "pub")]
    probabilities: TransitionProbabilities,
}

impl ModeKinetics {
    /// Derive all tables from the frame label sequence. Sequences with fewer
    /// than two frames yield empty tables; this is not an error.
    pub(crate) fn compute(labels: FrameLabels) -> Self {
        let counts = TransitionCounts::from_frames(labels.frames());
        let occupancy = StateOccupancy::from_frames(labels.frames());
        let probabilities = TransitionProbabilities::compute(&counts, &occupancy, &labels);

        log::debug!(
            "derived kinetics tables: {} transitions, {} self-looping modes, {} modes",
            counts.transitions().len(),
            counts.self_loops().len(),
            labels.n_states(),
        );

        ModeKinetics {
            labels,
            counts,
            occupancy,
            probabilities,
        }
    }

    /// Get the total number of frames in the analyzed sequence.
    pub fn n_frames(&self) -> usize {
        self.labels.n_frames()
    }
}
