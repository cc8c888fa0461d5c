//! Label hierarchy.
//!
//! This module provides the ordered set of classification levels and the
//! adjacency queries reclassification relies on.

use clearance_core::error::LabelError;
use clearance_core::types::{Direction, Label, Rank};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

/// An ordered set of labels keyed by rank.
///
/// Ranks and names are both unique. Adjacency is defined by the ordering:
/// the label above rank `r` is the one with the least rank greater than `r`,
/// whatever the gap between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Label>", into = "Vec<Label>")]
pub struct LabelHierarchy {
    labels: BTreeMap<Rank, Label>,
}

impl LabelHierarchy {
    /// Build a hierarchy from labels in any order.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::DuplicateRank`] or [`LabelError::DuplicateName`]
    /// if two labels collide.
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Result<Self, LabelError> {
        let mut hierarchy = Self::default();
        for label in labels {
            hierarchy.insert(label)?;
        }
        Ok(hierarchy)
    }

    /// Build a hierarchy from names listed lowest first, ranked `1..=n`.
    pub fn from_names<I, S>(names: I) -> Result<Self, LabelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = names
            .into_iter()
            .zip(1i64..)
            .map(|(name, rank)| Label::new(rank, name))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(labels)
    }

    /// Add a label.
    pub fn insert(&mut self, label: Label) -> Result<(), LabelError> {
        if self.labels.contains_key(&label.rank()) {
            return Err(LabelError::DuplicateRank(label.rank()));
        }
        if self.by_name(label.name()).is_some() {
            return Err(LabelError::DuplicateName(label.name().to_string()));
        }
        self.labels.insert(label.rank(), label);
        Ok(())
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the hierarchy has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in ascending rank order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Label> + '_ {
        self.labels.values()
    }

    /// The least sensitive label.
    pub fn lowest(&self) -> Option<&Label> {
        self.labels.values().next()
    }

    /// The most sensitive label.
    pub fn highest(&self) -> Option<&Label> {
        self.labels.values().next_back()
    }

    /// The label with the given rank.
    pub fn by_rank(&self, rank: Rank) -> Option<&Label> {
        self.labels.get(&rank)
    }

    /// The label with the given name.
    pub fn by_name(&self, name: &str) -> Option<&Label> {
        self.labels.values().find(|label| label.name() == name)
    }

    /// Every label with rank at or below `rank`, ascending.
    pub fn all_labels_up_to(&self, rank: Rank) -> impl DoubleEndedIterator<Item = &Label> + '_ {
        self.labels.range(..=rank).map(|(_, label)| label)
    }

    /// The label with the greatest rank strictly below `rank`.
    pub fn adjacent_below(&self, rank: Rank) -> Option<&Label> {
        self.labels.range(..rank).next_back().map(|(_, label)| label)
    }

    /// The label with the least rank strictly above `rank`.
    pub fn adjacent_above(&self, rank: Rank) -> Option<&Label> {
        self.labels
            .range((Excluded(rank), Unbounded))
            .next()
            .map(|(_, label)| label)
    }

    /// The nearest label on the given side of `rank`.
    pub fn adjacent(&self, direction: Direction, rank: Rank) -> Option<&Label> {
        match direction {
            Direction::Below => self.adjacent_below(rank),
            Direction::Above => self.adjacent_above(rank),
        }
    }
}

impl TryFrom<Vec<Label>> for LabelHierarchy {
    type Error = LabelError;

    fn try_from(labels: Vec<Label>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<LabelHierarchy> for Vec<Label> {
    fn from(hierarchy: LabelHierarchy) -> Self {
        hierarchy.labels.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> LabelHierarchy {
        LabelHierarchy::from_names(["Unclassified", "Confidential", "Secret", "TopSecret"]).unwrap()
    }

    fn sparse() -> LabelHierarchy {
        LabelHierarchy::new([
            Label::new(10, "Public").unwrap(),
            Label::new(40, "Internal").unwrap(),
            Label::new(41, "Restricted").unwrap(),
            Label::new(100, "Sealed").unwrap(),
        ])
        .unwrap()
    }

    fn names<'a>(labels: impl Iterator<Item = &'a Label>) -> Vec<&'a str> {
        labels.map(Label::name).collect()
    }

    #[test]
    fn test_from_names_assigns_ascending_ranks() {
        let hierarchy = standard();
        assert_eq!(hierarchy.len(), 4);
        assert_eq!(hierarchy.by_name("Unclassified").unwrap().rank(), Rank::new(1));
        assert_eq!(hierarchy.by_name("TopSecret").unwrap().rank(), Rank::new(4));
        assert_eq!(hierarchy.lowest().unwrap().name(), "Unclassified");
        assert_eq!(hierarchy.highest().unwrap().name(), "TopSecret");
    }

    #[test]
    fn test_duplicates_rejected() {
        let result = LabelHierarchy::new([
            Label::new(1, "Secret").unwrap(),
            Label::new(1, "Other").unwrap(),
        ]);
        assert_eq!(result, Err(LabelError::DuplicateRank(Rank::new(1))));

        let result = LabelHierarchy::from_names(["Secret", "Secret"]);
        assert_eq!(result, Err(LabelError::DuplicateName("Secret".to_string())));
    }

    #[test]
    fn test_all_labels_up_to_is_inclusive() {
        let hierarchy = standard();
        assert_eq!(
            names(hierarchy.all_labels_up_to(Rank::new(3))),
            vec!["Unclassified", "Confidential", "Secret"]
        );
        assert_eq!(names(hierarchy.all_labels_up_to(Rank::new(0))), Vec::<&str>::new());
    }

    #[test]
    fn test_adjacency_on_contiguous_ranks() {
        let hierarchy = standard();
        assert_eq!(hierarchy.adjacent_below(Rank::new(3)).unwrap().name(), "Confidential");
        assert_eq!(hierarchy.adjacent_above(Rank::new(3)).unwrap().name(), "TopSecret");
        assert!(hierarchy.adjacent_below(Rank::new(1)).is_none());
        assert!(hierarchy.adjacent_above(Rank::new(4)).is_none());
    }

    #[test]
    fn test_adjacency_on_sparse_ranks() {
        let hierarchy = sparse();
        assert_eq!(hierarchy.adjacent_below(Rank::new(40)).unwrap().name(), "Public");
        assert_eq!(hierarchy.adjacent_above(Rank::new(41)).unwrap().name(), "Sealed");
        assert_eq!(
            hierarchy.adjacent(Direction::Above, Rank::new(40)).unwrap().name(),
            "Restricted"
        );
        // Ranks between labels still resolve to the nearest neighbour.
        assert_eq!(hierarchy.adjacent_below(Rank::new(75)).unwrap().name(), "Restricted");
        assert_eq!(hierarchy.adjacent_above(Rank::new(75)).unwrap().name(), "Sealed");
    }

    #[test]
    fn test_serde_round_trip_preserves_order() {
        let hierarchy = sparse();
        let json = serde_json::to_string(&hierarchy).unwrap();
        let restored: LabelHierarchy = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, hierarchy);

        let duplicate = r#"[{"rank":1,"name":"A"},{"rank":1,"name":"B"}]"#;
        assert!(serde_json::from_str::<LabelHierarchy>(duplicate).is_err());
    }
}
