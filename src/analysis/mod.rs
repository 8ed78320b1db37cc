// Released under MIT License.

//! This module contains the implementation of the analysis logic.

use crate::input::Analysis;
use crate::presentation::MarkovResults;

pub(crate) mod counts;
pub(crate) mod graph;
pub(crate) mod kinetics;
pub(crate) mod occupancy;
pub(crate) mod probability;
pub(crate) mod sequence;

use kinetics::ModeKinetics;
use sequence::FrameLabels;

impl Analysis {
    /// Perform the analysis: read the binding-mode sequence and derive all
    /// transition tables. The returned results render the per-threshold
    /// Markov-chain diagrams when written.
    pub fn run(self) -> Result<MarkovResults, Box<dyn std::error::Error + Send + Sync>> {
        self.info();

        let labels = FrameLabels::from_modes(self.modes())?;
        crate::colog_info!(
            "Read a sequence of '{}' frames covering '{}' binding modes.",
            labels.n_frames(),
            labels.n_states(),
        );

        if labels.n_frames() < 2 {
            crate::colog_warn!(
                "The binding-mode sequence contains '{}' frames; no transitions can be detected.",
                labels.n_frames()
            );
        }

        let kinetics = ModeKinetics::compute(labels);
        Ok(MarkovResults::new(kinetics, self))
    }
}
