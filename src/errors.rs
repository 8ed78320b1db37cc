// Released under MIT License.

//! This module contains error types that can be returned by the `modekin` crate.

use std::path::Path;

use colored::{ColoredString, Colorize};
use thiserror::Error;

fn path_to_yellow(path: &Path) -> ColoredString {
    path.to_string_lossy().as_ref().yellow()
}

/// Errors that can occur when constructing an `Analysis` structure from the provided configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{} could not open the configuration file '{}'", "error:".red().bold(), .0.yellow())]
    CouldNotOpenConfig(String),

    #[error("{} could not understand the contents of the configuration file '{}' ({})", "error:".red().bold(), .0.yellow(), .1
    )]
    CouldNotParseConfig(String, serde_yaml::Error),

    #[error("{} the minimum transition percentage is '{}' but it must be higher than '{}' and at most '{}'", "error:".red().bold(), .0.to_string().yellow(), "0".yellow(), "100".yellow()
    )]
    InvalidMinTransition(f64),

    #[error("{} the font size for node labels must be at least '{}'", "error:".red().bold(), "1".yellow())]
    InvalidFontSize,

    #[error("{} the base node size must be at least '{}'", "error:".red().bold(), "1".yellow())]
    InvalidNodeSize,
}

/// Errors that can occur when reading the binding-mode sequence.
#[derive(Error, Debug)]
pub enum ModesError {
    #[error("{} could not open the binding modes file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotOpenModes(Box<Path>),

    #[error("{} invalid binding mode label '{}' at line '{}' of file '{}' (labels must not contain whitespace)", "error:".red().bold(), .label.yellow(), .line.to_string().yellow(), path_to_yellow(.path)
    )]
    InvalidLabel {
        path: Box<Path>,
        line: usize,
        label: String,
    },
}

/// Errors that can occur while rendering a single Markov-chain diagram.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{} could not create the diagram file '{}' ({})", "error:".red().bold(), path_to_yellow(.0), .1
    )]
    CouldNotCreateDiagram(Box<Path>, String),

    #[error("{} could not draw into the diagram file '{}' ({})", "error:".red().bold(), path_to_yellow(.0), .1
    )]
    CouldNotDrawDiagram(Box<Path>, String),
}

/// Errors that can occur while writing the Markov-chain diagrams.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{} could not create directory '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotCreateDirectory(Box<Path>),

    #[error("{} could not create a backup for directory '{}'", "error:".red().bold(), path_to_yellow(.0)
    )]
    CouldNotBackupDirectory(Box<Path>),

    #[error("{} could not render diagrams for {} of {} thresholds (failed thresholds: {}%)", "error:".red().bold(), .failed.len().to_string().yellow(), .attempted.to_string().yellow(), .failed.iter().map(|x| x.to_string()).collect::<Vec<_>>().join("%, ").yellow()
    )]
    IncompleteRender { failed: Vec<f64>, attempted: usize },
}
