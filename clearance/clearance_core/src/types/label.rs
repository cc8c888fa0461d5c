//! Classification labels.
//!
//! A label is a level in a totally ordered hierarchy. Its position is given
//! by its [`Rank`]; two labels compare by rank alone, and adjacency is a
//! property of the ordering rather than of rank arithmetic.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::LabelError;

/// The ordinal position of a label in the hierarchy.
///
/// Higher ranks are more sensitive. Ranks need not be contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(i64);

impl Rank {
    /// Create a rank from its numeric value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The numeric value of this rank.
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Rank {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which neighbour of a rank to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The greatest rank strictly less than the given one
    Below,

    /// The least rank strictly greater than the given one
    Above,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Below => write!(f, "below"),
            Self::Above => write!(f, "above"),
        }
    }
}

/// Check that a label name can be appended to an action prefix.
///
/// Names must be non-empty ASCII alphanumerics starting with an uppercase
/// letter, so `read<Name>` splits back into exactly one action and one name.
pub fn validate_label_name(name: &str) -> Result<(), LabelError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => first.is_ascii_uppercase() && chars.all(|c| c.is_ascii_alphanumeric()),
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(LabelError::InvalidName(name.to_string()))
    }
}

/// A classification level.
///
/// Labels are created once when the hierarchy is set up and never renamed
/// or re-ranked afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LabelRecord")]
pub struct Label {
    rank: Rank,
    name: String,
}

#[derive(Deserialize)]
struct LabelRecord {
    rank: Rank,
    name: String,
}

impl TryFrom<LabelRecord> for Label {
    type Error = LabelError;

    fn try_from(record: LabelRecord) -> Result<Self, Self::Error> {
        Label::new(record.rank.value(), record.name)
    }
}

impl Label {
    /// Create a label, validating its name.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::InvalidName`] if the name is not usable inside a
    /// permission identifier.
    pub fn new(rank: i64, name: impl Into<String>) -> Result<Self, LabelError> {
        let name = name.into();
        validate_label_name(&name)?;
        Ok(Self {
            rank: Rank(rank),
            name,
        })
    }

    /// The rank of this label.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// The name of this label.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A reference to a label by rank or by name, as supplied by callers that
/// have not resolved it against the label store yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelRef {
    /// Look the label up by rank
    Rank(Rank),

    /// Look the label up by name
    Name(String),
}

impl From<&Label> for LabelRef {
    fn from(label: &Label) -> Self {
        Self::Rank(label.rank())
    }
}

impl fmt::Display for LabelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rank(rank) => write!(f, "rank {}", rank),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_name_validation() {
        assert!(Label::new(1, "Unclassified").is_ok());
        assert!(Label::new(4, "TopSecret").is_ok());
        assert!(Label::new(5, "Level5").is_ok());

        assert_eq!(
            Label::new(1, "secret"),
            Err(LabelError::InvalidName("secret".to_string()))
        );
        assert!(Label::new(1, "").is_err());
        assert!(Label::new(1, "Top Secret").is_err());
        assert!(Label::new(1, "Top-Secret").is_err());
        assert!(Label::new(1, "5Eyes").is_err());
    }

    #[test]
    fn test_label_ordering_follows_rank() {
        let low = Label::new(10, "Zulu").unwrap();
        let high = Label::new(20, "Alpha").unwrap();
        assert!(low < high);
        assert_eq!(low.rank().cmp(&high.rank()), Ordering::Less);
    }

    #[test]
    fn test_label_deserialize_validates() {
        let label: Label = serde_json::from_str(r#"{"rank":3,"name":"Secret"}"#).unwrap();
        assert_eq!(label.rank(), Rank::new(3));
        assert_eq!(label.name(), "Secret");

        let invalid = serde_json::from_str::<Label>(r#"{"rank":3,"name":"secret"}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_rank_serializes_transparently() {
        assert_eq!(serde_json::to_string(&Rank::new(7)).unwrap(), "7");
    }
}
