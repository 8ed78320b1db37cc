// Released under MIT License.

//! Interned binding-mode labels and the frame label sequence.

use std::fmt;
use std::fs::read_to_string;
use std::path::Path;

use getset::CopyGetters;
use indexmap::IndexSet;

use crate::errors::ModesError;
use crate::input::ModeSequence;
use crate::PANIC_MESSAGE;

/// Identifier of a binding mode (state). Assigned in order of first appearance
/// in the frame sequence, which also defines the stable tie-breaking order used
/// when ranking states by occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Raw index of the state in the registry.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Ordered pair of states identifying a directed transition. The pair is
/// directional: `(A, B)` and `(B, A)` are distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, CopyGetters)]
pub struct StatePair {
    /// State the transition starts from.
    #[getset(get_copy = "pub")]
    from: StateId,
    /// State the transition leads to.
    #[getset(get_copy = "pub")]
    to: StateId,
}

impl StatePair {
    /// Create a new directed state pair.
    #[inline(always)]
    pub fn new(from: StateId, to: StateId) -> Self {
        Self { from, to }
    }

    /// Get the pair describing the transition in the opposite direction.
    #[inline(always)]
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

/// The frame label sequence: one interned binding-mode label per trajectory frame.
/// Immutable input to all downstream tables.
#[derive(Debug, Clone)]
pub struct FrameLabels {
    /// Binding-mode names in order of first appearance.
    registry: IndexSet<String>,
    /// Per-frame state identifiers, in trajectory order.
    frames: Vec<StateId>,
}

impl FrameLabels {
    /// Construct the frame labels from the provided mode sequence specification.
    pub(crate) fn from_modes(modes: &ModeSequence) -> Result<Self, ModesError> {
        match modes {
            ModeSequence::File(path) => Self::from_file(path),
            ModeSequence::Inline(labels) => Ok(Self::from_labels(labels.iter())),
        }
    }

    /// Construct the frame labels from an iterator of binding-mode names.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = IndexSet::new();
        let mut frames = Vec::new();

        for label in labels {
            let (index, _) = registry.insert_full(label.as_ref().to_owned());
            frames.push(StateId(index));
        }

        FrameLabels { registry, frames }
    }

    /// Read the frame labels from a file containing one binding-mode label per line.
    /// Empty lines are skipped; labels must not contain internal whitespace.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModesError> {
        let contents = read_to_string(&path)
            .map_err(|_| ModesError::CouldNotOpenModes(Box::from(path.as_ref())))?;

        let mut labels = Vec::new();
        for (line_number, line) in contents.lines().enumerate() {
            let label = line.trim();
            if label.is_empty() {
                continue;
            }

            if label.split_whitespace().count() > 1 {
                return Err(ModesError::InvalidLabel {
                    path: Box::from(path.as_ref()),
                    line: line_number + 1,
                    label: label.to_owned(),
                });
            }

            labels.push(label);
        }

        Ok(Self::from_labels(labels))
    }

    /// Get the per-frame state identifiers, in trajectory order.
    #[inline(always)]
    pub fn frames(&self) -> &[StateId] {
        &self.frames
    }

    /// Get the total number of frames in the sequence.
    #[inline(always)]
    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// Get the number of distinct binding modes in the sequence.
    #[inline(always)]
    pub fn n_states(&self) -> usize {
        self.registry.len()
    }

    /// Get the name of a binding mode. Panics if the state does not exist,
    /// which indicates an internal inconsistency.
    pub fn state_name(&self, state: StateId) -> &str {
        self.registry.get_index(state.0).unwrap_or_else(|| {
            panic!(
                "FATAL MODEKIN ERROR | FrameLabels::state_name | State with index '{}' does not exist. {}",
                state.0, PANIC_MESSAGE
            )
        })
    }

    /// Iterate over all distinct states in order of first appearance.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.registry.len()).map(StateId)
    }

    /// Describe a directed state pair using binding-mode names. Used for logging.
    pub(crate) fn describe_pair(&self, pair: &StatePair) -> String {
        format!(
            "{} -> {}",
            self.state_name(pair.from()),
            self.state_name(pair.to())
        )
    }
}

impl fmt::Display for FrameLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames, {} binding modes",
            self.n_frames(),
            self.n_states()
        )
    }
}
