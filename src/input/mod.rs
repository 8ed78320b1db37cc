// Released under MIT License.

//! This module contains structures and methods for specifying parameters of the analysis.

pub mod analysis;
pub mod thresholds;

use std::fmt;

pub use analysis::Analysis;
pub use thresholds::Thresholds;

use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

/// Source of the binding-mode sequence: either a path to a file containing
/// one binding-mode label per frame, or the labels supplied directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModeSequence {
    File(String),
    Inline(Vec<String>),
}

impl From<&str> for ModeSequence {
    fn from(value: &str) -> Self {
        Self::File(value.to_owned())
    }
}

impl From<String> for ModeSequence {
    fn from(value: String) -> Self {
        Self::File(value)
    }
}

impl From<Vec<String>> for ModeSequence {
    fn from(value: Vec<String>) -> Self {
        Self::Inline(value)
    }
}

impl From<Vec<&str>> for ModeSequence {
    fn from(value: Vec<&str>) -> Self {
        Self::Inline(value.into_iter().map(|x| x.to_owned()).collect())
    }
}

impl<'de> Deserialize<'de> for ModeSequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ModeSequenceVisitor;

        impl<'de> Visitor<'de> for ModeSequenceVisitor {
            type Value = ModeSequence;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a path to a binding modes file or a list of binding-mode labels")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ModeSequence::File(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ModeSequence::File(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut labels = Vec::new();
                while let Some(label) = seq.next_element::<String>()? {
                    labels.push(label);
                }
                Ok(ModeSequence::Inline(labels))
            }
        }

        deserializer.deserialize_any(ModeSequenceVisitor)
    }
}

#[cfg(test)]
mod tests_mode_sequence {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct TestStruct {
        modes: ModeSequence,
    }

    #[test]
    fn test_mode_sequence_deserialize() {
        let yaml = "modes: \"path/to/modes.txt\"";
        let test: TestStruct = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(test.modes, ModeSequence::File("path/to/modes.txt".to_owned()));

        let yaml = "modes: [Mode_1, Mode_2, Mode_1]";
        let test: TestStruct = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            test.modes,
            ModeSequence::Inline(vec![
                "Mode_1".to_owned(),
                "Mode_2".to_owned(),
                "Mode_1".to_owned()
            ])
        );
    }

    #[test]
    fn test_mode_sequence_from() {
        assert_eq!(
            ModeSequence::from("modes.txt"),
            ModeSequence::File("modes.txt".to_owned())
        );

        assert_eq!(
            ModeSequence::from(vec!["A", "B"]),
            ModeSequence::Inline(vec!["A".to_owned(), "B".to_owned()])
        );
    }
}
