// Released under MIT License.

//! Contains the implementation of the main `Analysis` structure and its methods.

use std::fs::read_to_string;
use std::path::Path;

use derive_builder::Builder;
use getset::{CopyGetters, Getters, Setters};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

use super::ModeSequence;

/// Default font size of node labels in the Markov-chain diagrams (in points).
const DEFAULT_FONT_SIZE: usize = 12;

/// Default base size of nodes in the Markov-chain diagrams.
const DEFAULT_NODE_SIZE: usize = 200;

/// Default directory where the Markov-chain diagrams are stored.
const DEFAULT_OUTPUT_DIRECTORY: &str = "Binding_Modes_Markov_States";

/// Structure holding all the information necessary to perform the analysis.
#[derive(Debug, Clone, Builder, Getters, CopyGetters, Setters, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Analysis {
    /// The binding-mode sequence to analyze. Either a path to a file containing one
    /// binding-mode label per frame (one label per line), or a list of labels
    /// provided directly. The sequence covers all frames of the trajectory,
    /// including frames where the ligand is unbound (these should use a dedicated
    /// sentinel label such as 'Unassigned').
    #[builder(setter(into))]
    #[getset(get = "pub")]
    #[serde(alias = "binding_modes")]
    modes: ModeSequence,

    /// Base minimum transition percentage. A transition must account for at least
    /// this percentage of all frames to be retained in a diagram. Diagrams are
    /// rendered for this value multiplied by factors 1, 2, 5, and 10.
    #[getset(get_copy = "pub")]
    #[serde(alias = "minimum_transition")]
    min_transition: f64,

    /// Font size of the node labels in points. Defaults to 12 if not specified.
    #[builder(default = "DEFAULT_FONT_SIZE")]
    #[serde(default = "default_font_size")]
    #[getset(get_copy = "pub")]
    font_size: usize,

    /// Base size of the nodes in the diagrams. The size of each node is this value
    /// multiplied by the number of frames assigned to the corresponding binding mode.
    /// Defaults to 200 if not specified.
    #[builder(default = "DEFAULT_NODE_SIZE")]
    #[serde(default = "default_node_size")]
    #[getset(get_copy = "pub")]
    node_size: usize,

    /// Directory where the rendered diagrams will be stored. The directory is
    /// created if it does not exist. Defaults to 'Binding_Modes_Markov_States'.
    #[builder(setter(into), default = "DEFAULT_OUTPUT_DIRECTORY.to_owned()")]
    #[serde(default = "default_output_directory")]
    #[getset(get = "pub")]
    output_directory: String,

    /// If true, suppress all output to the standard output during the analysis.
    #[builder(setter(custom), default = "false")]
    #[serde(default = "default_false")]
    #[getset(get_copy = "pub", set = "pub")]
    silent: bool,

    /// If true, overwrite an existing output directory without creating a backup.
    #[builder(setter(custom), default = "false")]
    #[serde(default = "default_false")]
    #[getset(get_copy = "pub", set = "pub")]
    overwrite: bool,
}

fn default_font_size() -> usize {
    DEFAULT_FONT_SIZE
}

fn default_node_size() -> usize {
    DEFAULT_NODE_SIZE
}

fn default_output_directory() -> String {
    DEFAULT_OUTPUT_DIRECTORY.to_owned()
}

fn default_false() -> bool {
    false
}

fn validate_min_transition(min_transition: f64) -> Result<(), ConfigError> {
    if min_transition <= 0.0 || min_transition > 100.0 || !min_transition.is_finite() {
        Err(ConfigError::InvalidMinTransition(min_transition))
    } else {
        Ok(())
    }
}

fn validate_font_size(font_size: usize) -> Result<(), ConfigError> {
    if font_size == 0 {
        Err(ConfigError::InvalidFontSize)
    } else {
        Ok(())
    }
}

fn validate_node_size(node_size: usize) -> Result<(), ConfigError> {
    if node_size == 0 {
        Err(ConfigError::InvalidNodeSize)
    } else {
        Ok(())
    }
}

impl Analysis {
    /// Initiate the builder for the `Analysis` structure.
    pub fn builder() -> AnalysisBuilder {
        AnalysisBuilder::default()
    }

    /// Construct the `Analysis` structure from a YAML configuration file.
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let filename_str = filename.as_ref().to_str().unwrap_or("unknown").to_owned();
        let contents = read_to_string(&filename)
            .map_err(|_| ConfigError::CouldNotOpenConfig(filename_str.clone()))?;

        let analysis: Analysis = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::CouldNotParseConfig(filename_str, e))?;

        analysis.validate()?;
        Ok(analysis)
    }

    /// Check the sanity of the analysis options. Only needed for structures
    /// constructed by deserialization; the builder validates on `build`.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_min_transition(self.min_transition)?;
        validate_font_size(self.font_size)?;
        validate_node_size(self.node_size)?;
        Ok(())
    }

    /// Log basic information about the analysis.
    pub(crate) fn info(&self) {
        crate::colog_info!(
            "Analyzing binding-mode transition kinetics with a base minimum transition of '{}'%.",
            self.min_transition
        );

        match &self.modes {
            ModeSequence::File(path) => {
                crate::colog_info!("Reading binding modes from file '{}'.", path)
            }
            ModeSequence::Inline(labels) => crate::colog_info!(
                "Using a binding-mode sequence of '{}' frames provided directly.",
                labels.len()
            ),
        }
    }
}

impl AnalysisBuilder {
    /// Suppress all standard output during the analysis.
    pub fn silent(&mut self) -> &mut Self {
        self.silent = Some(true);
        self
    }

    /// Overwrite an existing output directory without creating a backup.
    pub fn overwrite(&mut self) -> &mut Self {
        self.overwrite = Some(true);
        self
    }

    /// Validate the options provided to the builder.
    fn validate(&self) -> Result<(), String> {
        if let Some(min_transition) = self.min_transition {
            validate_min_transition(min_transition).map_err(|e| e.to_string())?;
        }

        if let Some(font_size) = self.font_size {
            validate_font_size(font_size).map_err(|e| e.to_string())?;
        }

        if let Some(node_size) = self.node_size {
            validate_node_size(node_size).map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}
