// Released under MIT License.

//! Generation of the threshold ladder from the base minimum transition percentage.

use getset::Getters;

/// Multiplicative factors applied to the base minimum transition percentage.
/// One Markov-chain diagram is rendered per factor.
const LADDER_FACTORS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// Ladder of minimum-transition thresholds (in percent) for which the
/// Markov-chain diagrams are rendered.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Thresholds {
    /// Threshold values in percent, in increasing order.
    #[getset(get = "pub")]
    values: Vec<f64>,
}

impl Thresholds {
    /// Construct the threshold ladder from the base minimum transition percentage
    /// by applying the factors 1, 2, 5, and 10.
    pub fn ladder(min_transition: f64) -> Self {
        Self {
            values: LADDER_FACTORS.iter().map(|f| min_transition * f).collect(),
        }
    }

    /// Iterate over the threshold values.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Number of thresholds in the ladder.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Is the ladder empty? (Never the case for a ladder built from a valid base.)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_thresholds_ladder() {
        let thresholds = Thresholds::ladder(2.0);
        assert_eq!(thresholds.values(), &vec![2.0, 4.0, 10.0, 20.0]);
        assert_eq!(thresholds.len(), 4);
        assert!(!thresholds.is_empty());
    }

    #[test]
    fn test_thresholds_ladder_fractional() {
        let thresholds = Thresholds::ladder(0.5);
        let expected = [0.5, 1.0, 2.5, 5.0];

        for (value, expected) in thresholds.iter().zip(expected) {
            assert_relative_eq!(value, expected);
        }
    }
}
