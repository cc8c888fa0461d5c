use std::sync::Arc;

use clearance_core::types::{Document, Label, NewUser, Permission, Rank, User};
use clearance_core::{Direction, ReclassificationError};
use clearance_policy::engine::{downgrade, upgrade};
use clearance_policy::{
    can_downgrade, can_read, can_upgrade, can_write, readable_label_names, standard_roles,
    EffectivePermissions, LabelHierarchy, PermissionAggregator, PermissionCatalog,
    Reclassifier, Stores,
};

fn hierarchy() -> LabelHierarchy {
    LabelHierarchy::from_names(["Unclassified", "Confidential", "Secret", "TopSecret"]).unwrap()
}

fn label(hierarchy: &LabelHierarchy, name: &str) -> Label {
    hierarchy.by_name(name).unwrap().clone()
}

/// Stores seeded with the standard hierarchy, catalog and roles.
fn seeded_stores() -> Stores {
    let hierarchy = hierarchy();
    let stores = Stores::in_memory();
    for label in hierarchy.iter() {
        stores.labels.add_label(label.clone()).unwrap();
    }
    for permission in PermissionCatalog::for_hierarchy(&hierarchy).to_permissions() {
        stores.permissions.add_permission(permission).unwrap();
    }
    for role in standard_roles(&hierarchy) {
        stores.roles.add_role(role).unwrap();
    }
    stores
}

fn add_user(stores: &Stores, email: &str, roles: &[&str]) -> User {
    let user = User::new(NewUser::new(
        "Test",
        "User",
        email,
        "hash",
        roles.iter().copied(),
    ));
    stores.users.add_user(user.clone()).unwrap();
    user
}

#[test]
fn test_secret_writer_without_reclassification_rights() {
    let hierarchy = hierarchy();
    let document = Document::new("Plan.txt", label(&hierarchy, "Secret"), "");
    let permissions: EffectivePermissions = [
        "readUnclassified",
        "readConfidential",
        "readSecret",
        "writeSecret",
    ]
    .into_iter()
    .collect();

    assert!(can_read(&permissions, &document));
    assert!(can_write(&permissions, &document));
    assert!(!can_upgrade(&permissions, &document));
    assert!(!can_downgrade(&permissions, &document));
}

#[test]
fn test_downgrade_with_permission() {
    let hierarchy = hierarchy();
    let document = Document::new("Plan.txt", label(&hierarchy, "Secret"), "");
    let permissions: EffectivePermissions = [
        "readUnclassified",
        "readConfidential",
        "readSecret",
        "writeSecret",
        "downgradeSecret",
    ]
    .into_iter()
    .collect();

    assert!(can_downgrade(&permissions, &document));
    let moved = downgrade(&hierarchy, &document).unwrap();
    assert_eq!(moved.label().name(), "Confidential");
    assert_eq!(document.label().name(), "Secret");
}

#[test]
fn test_downgrade_at_lowest_is_rejected() {
    let hierarchy = hierarchy();
    let document = Document::new("Memo.txt", label(&hierarchy, "Unclassified"), "");

    let err = downgrade(&hierarchy, &document).unwrap_err();
    assert!(matches!(err, ReclassificationError::AlreadyLowest { .. }));
    assert_eq!(
        err.to_string(),
        "Document is already at the lowest level of classification."
    );

    let top = Document::new("Keys.txt", label(&hierarchy, "TopSecret"), "");
    let err = upgrade(&hierarchy, &top).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Document is already at the highest level of classification."
    );
}

#[test]
fn test_readable_label_names_ignores_other_permissions() {
    let permissions: EffectivePermissions = ["readConfidential", "readSecret", "manageUsers"]
        .into_iter()
        .collect();
    let names: Vec<String> = readable_label_names(&permissions).into_iter().collect();
    assert_eq!(names, vec!["Confidential", "Secret"]);
}

#[test]
fn test_sparse_hierarchy_reclassification() {
    let hierarchy = LabelHierarchy::new([
        Label::new(10, "Low").unwrap(),
        Label::new(20, "Mid").unwrap(),
        Label::new(40, "High").unwrap(),
    ])
    .unwrap();
    let reclassifier = Reclassifier::with_hierarchy(hierarchy.clone());

    let document = Document::new("Report.txt", label(&hierarchy, "High"), "");
    let moved = reclassifier.downgrade(&document).unwrap();
    assert_eq!(moved.label().rank(), Rank::from(20));

    let moved = reclassifier.reclassify(Direction::Below, &moved).unwrap();
    assert_eq!(moved.label().name(), "Low");
    assert!(reclassifier.downgrade(&moved).is_err());
}

#[test]
fn test_aggregated_permissions_follow_role_changes() {
    let stores = seeded_stores();
    let aggregator = PermissionAggregator::new(stores.users.clone(), stores.roles.clone());
    let user = add_user(&stores, "analyst@email.com", &["confidentialUser"]);

    let hierarchy = hierarchy();
    let secret = Document::new("Plan.txt", label(&hierarchy, "Secret"), "");

    let before = aggregator.resolve(&user.id).unwrap();
    assert!(before.contains("confidentialUser"));
    assert!(before.contains("readConfidential"));
    assert!(!can_read(&before, &secret));

    stores
        .roles
        .replace_permissions(
            "confidentialUser",
            vec![
                Permission::new("readConfidential"),
                Permission::new("readSecret"),
            ],
        )
        .unwrap();

    let after = aggregator.resolve(&user.id).unwrap();
    assert!(can_read(&after, &secret));
    assert!(!after.contains("readUnclassified"));
}

#[test]
fn test_aggregated_permissions_union_roles() {
    let stores = seeded_stores();
    let aggregator = PermissionAggregator::new(stores.users.clone(), stores.roles.clone());
    let user = add_user(
        &stores,
        "secret.admin@email.com",
        &["secretUser", "secretAdmin"],
    );

    let permissions = aggregator.resolve(&user.id).unwrap();
    let hierarchy = hierarchy();
    let secret = Document::new("Plan.txt", label(&hierarchy, "Secret"), "");
    let confidential = Document::new("Memo.txt", label(&hierarchy, "Confidential"), "");

    assert!(can_downgrade(&permissions, &secret));
    assert!(can_upgrade(&permissions, &confidential));
    assert!(!can_upgrade(&permissions, &secret));
    assert!(permissions.contains("secretUser"));
    assert!(permissions.contains("secretAdmin"));
}

#[test]
fn test_store_backed_reclassifier_sees_new_labels() {
    let stores = seeded_stores();
    let reclassifier = Reclassifier::new(Arc::clone(&stores.labels));

    let hierarchy = hierarchy();
    let top = Document::new("Keys.txt", label(&hierarchy, "TopSecret"), "");
    assert!(reclassifier.upgrade(&top).is_err());

    stores
        .labels
        .add_label(Label::new(5, "Cosmic").unwrap())
        .unwrap();
    let moved = reclassifier.upgrade(&top).unwrap();
    assert_eq!(moved.label().name(), "Cosmic");
}
