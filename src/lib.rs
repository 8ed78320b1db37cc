// Released under MIT License.

//! # modekin: Binding-mode transition kinetics from MD simulations
//!
//! A crate for analyzing how a protein-ligand system moves between discrete
//! binding modes during a molecular dynamics simulation. `modekin` takes an
//! ordered sequence of per-frame binding-mode labels (produced by an upstream
//! clustering step), tabulates transition statistics, and renders a family of
//! Markov-chain diagrams showing the transition kinetics at several
//! significance thresholds.
//!
//! ## Usage
//!
//! Run:
//!
//! ```bash
//! $ cargo add modekin
//! ```
//!
//! Import the crate in your Rust code:
//!
//! ```rust
//! use modekin::prelude::*;
//! ```
//!
//! `modekin` is also available as a command-line tool. You can install it using:
//!
//! ```bash
//! $ cargo install modekin
//! ```
//!
//! ## Quick example
//!
//! Basic analysis of binding-mode kinetics:
//!
//! ```no_run
//! use modekin::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // Construct the analysis
//!     let analysis = Analysis::builder()
//!         .modes("binding_modes.txt")   // File with one binding-mode label per frame
//!         .min_transition(2.0)          // Base minimum transition percentage
//!         .build()?;                    // Build the analysis
//!
//!     // Activate colog for logging (requires the `colog` crate)
//!     colog::init();
//!
//!     // Run the analysis and render the Markov-chain diagrams
//!     analysis.run()?.write()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! A Markov-chain diagram is rendered for each threshold of the ladder derived
//! from `min_transition` (factors 1, 2, 5, and 10). With a base of 2%, the
//! diagrams are generated for thresholds of 2%, 4%, 10%, and 20%.
//!
//! The binding-mode sequence can also be supplied directly, which is useful
//! when `modekin` is driven by another program:
//!
//! ```no_run
//! use modekin::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let analysis = Analysis::builder()
//!         .modes(vec!["Mode_1", "Mode_1", "Mode_2", "Mode_1"])
//!         .min_transition(5.0)
//!         .output_directory("markov_diagrams")  // Where to store the diagrams
//!         .font_size(14)                        // Font size of node labels
//!         .node_size(250)                       // Base size of the nodes
//!         .build()?;
//!
//!     colog::init();
//!     analysis.run()?.write()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Alternatively, the `Analysis` structure can be constructed from a YAML
//! configuration file that is also used by the CLI version of `modekin`:
//!
//! ```no_run
//! # use modekin::prelude::*;
//! #
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let analysis = Analysis::from_file("analysis.yaml")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting the results
//!
//! [`Analysis::run`](crate::prelude::Analysis::run) computes all transition
//! tables once and returns a [`MarkovResults`](crate::prelude::MarkovResults)
//! structure. Calling [`MarkovResults::write`](crate::prelude::MarkovResults::write)
//! renders one diagram per threshold into the output directory. The computed
//! tables can also be inspected programmatically through
//! [`ModeKinetics`](crate::prelude::ModeKinetics).

/// Version of the `modekin` crate.
pub const MODEKIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Message that should be added to every panic.
pub(crate) const PANIC_MESSAGE: &str =
    "\n\n\n            >>> THIS SHOULD NOT HAVE HAPPENED! PLEASE REPORT THIS ERROR <<<\n\n";

/// Log colored info message.
#[macro_export]
macro_rules! colog_info {
    ($msg:expr) => {
        log::info!($msg)
    };
    ($msg:expr, $($arg:expr),+ $(,)?) => {{
        use colored::Colorize;
        log::info!($msg, $( $arg.to_string().cyan() ),+)
    }};
}

/// Log colored warning message.
#[macro_export]
macro_rules! colog_warn {
    ($msg:expr) => {
        log::warn!($msg)
    };
    ($msg:expr, $($arg:expr),+ $(,)?) => {{
        use colored::Colorize;
        log::warn!($msg, $( $arg.to_string().yellow() ),+)
    }};
}

mod analysis;
pub mod errors;
pub mod input;
pub mod presentation;

/// This module contains re-exported public structures of the `modekin` crate.
pub mod prelude {
    pub use super::input::{analysis::AnalysisBuilder, Analysis, ModeSequence, Thresholds};

    pub use super::analysis::{
        counts::TransitionCounts,
        kinetics::ModeKinetics,
        occupancy::{Epoch, StateOccupancy, TemporalClass},
        probability::TransitionProbabilities,
        sequence::{FrameLabels, StateId, StatePair},
    };

    pub use super::presentation::MarkovResults;
}
