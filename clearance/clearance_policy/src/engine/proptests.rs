//! Property-based tests for the policy engine.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::engine::{can, can_read, can_write, effective_permissions, reclassify};
    use crate::{EffectivePermissions, LabelHierarchy, PermissionCatalog, RolePermissionResolver};
    use clearance_core::types::{Action, Direction, Document, Label, PermissionId};
    use clearance_core::ReclassificationError;
    use proptest::prelude::*;

    /// Hierarchies of one to eight labels over arbitrary, sparse ranks.
    fn hierarchy() -> impl Strategy<Value = LabelHierarchy> {
        proptest::collection::btree_set(-1000i64..1000, 1..8).prop_map(|ranks| {
            LabelHierarchy::new(
                ranks
                    .into_iter()
                    .enumerate()
                    .map(|(i, rank)| Label::new(rank, format!("Level{}", i)).unwrap()),
            )
            .unwrap()
        })
    }

    fn labels(hierarchy: &LabelHierarchy) -> Vec<Label> {
        hierarchy.iter().cloned().collect()
    }

    fn standard_catalog() -> PermissionCatalog {
        PermissionCatalog::for_hierarchy(
            &LabelHierarchy::from_names(["Unclassified", "Confidential", "Secret", "TopSecret"])
                .unwrap(),
        )
    }

    fn select(catalog: &PermissionCatalog, mask: &[bool]) -> EffectivePermissions {
        catalog
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    proptest! {
        #[test]
        fn test_decisions_are_monotone_in_permissions(
            base in proptest::collection::vec(any::<bool>(), 15),
            extra in proptest::collection::vec(any::<bool>(), 15),
        ) {
            let catalog = standard_catalog();
            let smaller = select(&catalog, &base);
            let larger = smaller.union(&select(&catalog, &extra));

            for label in catalog.hierarchy().iter() {
                let document = Document::new("Doc.txt", label.clone(), "");
                for action in [Action::Read, Action::Write, Action::Upgrade, Action::Downgrade] {
                    if can(action, &smaller, &document) {
                        assert!(can(action, &larger, &document));
                    }
                }
            }
        }

        #[test]
        fn test_adjacency_is_inverse(hierarchy in hierarchy()) {
            for label in hierarchy.iter() {
                if let Some(above) = hierarchy.adjacent_above(label.rank()) {
                    assert_eq!(hierarchy.adjacent_below(above.rank()), Some(label));
                }
                if let Some(below) = hierarchy.adjacent_below(label.rank()) {
                    assert_eq!(hierarchy.adjacent_above(below.rank()), Some(label));
                }
            }
        }

        #[test]
        fn test_adjacent_below_is_greatest_lower_rank(hierarchy in hierarchy()) {
            let labels = labels(&hierarchy);
            for label in &labels {
                let expected = labels
                    .iter()
                    .filter(|other| other.rank() < label.rank())
                    .max_by_key(|other| other.rank());
                assert_eq!(hierarchy.adjacent_below(label.rank()), expected);
            }
        }

        #[test]
        fn test_level_role_reads_down_and_writes_own_level(hierarchy in hierarchy()) {
            let resolver = RolePermissionResolver::new(&hierarchy);
            for label in hierarchy.iter() {
                let permissions = resolver.permissions_for_role_at_level(label);
                assert!(permissions.contains(&PermissionId::for_label(Action::Write, label)));

                for other in hierarchy.iter() {
                    let read = PermissionId::for_label(Action::Read, other);
                    assert_eq!(permissions.contains(&read), other.rank() <= label.rank());
                    if other != label {
                        let write = PermissionId::for_label(Action::Write, other);
                        assert!(!permissions.contains(&write));
                    }
                }
            }
        }

        #[test]
        fn test_read_access_is_monotone_in_level(hierarchy in hierarchy()) {
            let resolver = RolePermissionResolver::new(&hierarchy);
            for level in hierarchy.iter() {
                let role = resolver.level_role(level);
                let permissions = effective_permissions([&role]);

                for label in hierarchy.iter() {
                    let document = Document::new("Doc.txt", label.clone(), "");
                    assert_eq!(can_read(&permissions, &document), label.rank() <= level.rank());
                    assert_eq!(can_write(&permissions, &document), label == level);
                }
            }
        }

        #[test]
        fn test_reclassification_moves_one_step(hierarchy in hierarchy()) {
            for label in hierarchy.iter() {
                let document = Document::new("Doc.txt", label.clone(), "contents");
                for direction in [Direction::Below, Direction::Above] {
                    match reclassify(&hierarchy, direction, &document) {
                        Ok(moved) => {
                            let expected = hierarchy.adjacent(direction, label.rank()).unwrap();
                            assert_eq!(moved.label(), expected);
                            assert_eq!(moved.id, document.id);
                            assert_eq!(moved.contents, document.contents);
                        }
                        Err(err) => {
                            assert!(hierarchy.adjacent(direction, label.rank()).is_none());
                            assert_eq!(err.label(), label);
                        }
                    }
                }
            }
        }

        #[test]
        fn test_rejection_at_the_ends_is_idempotent(hierarchy in hierarchy()) {
            let lowest = hierarchy.lowest().unwrap().clone();
            let highest = hierarchy.highest().unwrap().clone();

            let bottom = Document::new("Bottom.txt", lowest.clone(), "");
            for _ in 0..3 {
                let err = reclassify(&hierarchy, Direction::Below, &bottom).unwrap_err();
                assert_eq!(err, ReclassificationError::AlreadyLowest { label: lowest.clone() });
                assert_eq!(bottom.label(), &lowest);
            }

            let top = Document::new("Top.txt", highest.clone(), "");
            for _ in 0..3 {
                let err = reclassify(&hierarchy, Direction::Above, &top).unwrap_err();
                assert_eq!(err, ReclassificationError::AlreadyHighest { label: highest.clone() });
                assert_eq!(top.label(), &highest);
            }
        }
    }
}
