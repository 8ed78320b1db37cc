// Released under MIT License.

//! This module contains structures and methods for rendering the results of the analysis.

mod diagram;
mod layout;

use std::fs;
use std::path::{Path, PathBuf};

use getset::Getters;

use crate::analysis::graph::ThresholdGraph;
use crate::analysis::kinetics::ModeKinetics;
use crate::errors::WriteError;
use crate::input::{Analysis, Thresholds};
use crate::PANIC_MESSAGE;

/// Specifies whether the output directory existed before the analysis and
/// whether it has been overwritten or backed up.
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
enum DirectoryStatus {
    New,
    Backup,
    Overwrite,
}

impl DirectoryStatus {
    /// Log information about the output directory and what has been performed with it.
    fn info(self, dirname: &str) {
        match self {
            Self::New => crate::colog_info!(
                "Writing Markov-chain diagrams into a new directory '{}'.",
                dirname
            ),
            Self::Backup => crate::colog_info!(
                "Backed up an already existing directory '{}' and writing Markov-chain diagrams.",
                dirname,
            ),
            Self::Overwrite => crate::colog_warn!(
                "Writing Markov-chain diagrams into an already existing directory '{}'.",
                dirname,
            ),
        }
    }
}

/// Results of the binding-mode kinetics analysis. Holds the tables computed
/// from the frame sequence; rendering the per-threshold diagrams is performed
/// by [`MarkovResults::write`].
#[derive(Debug, Clone, Getters)]
pub struct MarkovResults {
    /// All tables derived from the frame label sequence.
    #[getset(get = "pub")]
    kinetics: ModeKinetics,

    /// Parameters of the analysis.
    #[getset(get = "pub")]
    analysis: Analysis,
}

impl MarkovResults {
    pub(crate) fn new(kinetics: ModeKinetics, analysis: Analysis) -> Self {
        MarkovResults { kinetics, analysis }
    }

    /// Get the total number of analyzed frames.
    pub fn n_frames(&self) -> usize {
        self.kinetics.n_frames()
    }

    /// Render one Markov-chain diagram per threshold of the ladder into the
    /// output directory.
    ///
    /// A failure while rendering one diagram does not prevent rendering of the
    /// remaining diagrams; all failures are collected and reported together at
    /// the end. Creating the output directory is fatal if it fails.
    pub fn write(&self) -> Result<(), WriteError> {
        if self.n_frames() < 2 {
            crate::colog_warn!(
                "Nothing to render: the binding-mode sequence contains '{}' frames.",
                self.n_frames()
            );
            return Ok(());
        }

        let directory = self.prepare_output_directory()?;
        let thresholds = Thresholds::ladder(self.analysis.min_transition());

        let mut failed = Vec::new();
        for threshold in thresholds.iter() {
            let graph = ThresholdGraph::build(threshold, self.kinetics.probabilities());
            let path = directory.join(format!("markov_chain_plot_{}.png", threshold));

            log::debug!(
                "rendering diagram for threshold {}%: {} nodes, {} edges ({} retained)",
                threshold,
                graph.n_nodes(),
                graph.n_edges(),
                graph.retained_edges().count(),
            );

            match diagram::render(&graph, &self.kinetics, &self.analysis, &path) {
                Ok(()) => crate::colog_info!(
                    "Rendered a Markov-chain diagram for a threshold of '{}'% into '{}'.",
                    threshold,
                    path.to_str().expect(PANIC_MESSAGE),
                ),
                Err(e) => {
                    log::error!("{}", e);
                    failed.push(threshold);
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(WriteError::IncompleteRender {
                failed,
                attempted: thresholds.len(),
            })
        }
    }

    /// Create the output directory if needed. An existing directory is backed
    /// up unless overwriting was requested.
    fn prepare_output_directory(&self) -> Result<PathBuf, WriteError> {
        let directory = PathBuf::from(self.analysis.output_directory());

        let status = if directory.exists() {
            if self.analysis.overwrite() {
                DirectoryStatus::Overwrite
            } else {
                backitup::backup(&directory)
                    .map_err(|_| WriteError::CouldNotBackupDirectory(box_path(&directory)))?;
                fs::create_dir_all(&directory)
                    .map_err(|_| WriteError::CouldNotCreateDirectory(box_path(&directory)))?;
                DirectoryStatus::Backup
            }
        } else {
            fs::create_dir_all(&directory)
                .map_err(|_| WriteError::CouldNotCreateDirectory(box_path(&directory)))?;
            DirectoryStatus::New
        };

        status.info(self.analysis.output_directory());
        Ok(directory)
    }
}

fn box_path(path: &Path) -> Box<Path> {
    Box::from(path)
}

/// Format a percentage for display on the diagrams.
pub(crate) fn format_percent(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.5), "12.50");
        assert_eq!(format_percent(0.0), "0.00");
        assert_eq!(format_percent(100.0 / 3.0), "33.33");
    }
}
