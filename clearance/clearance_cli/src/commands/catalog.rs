//! Inspection commands
//!
//! Read-only views of the seeded labels, permissions, roles and users.

use anyhow::Result;
use clearance_runtime::Runtime;
use serde::Serialize;

use super::{print_json, OutputArgs};

/// Print the label hierarchy.
pub fn labels(runtime: &Runtime, args: &OutputArgs) -> Result<()> {
    let labels = runtime.stores.labels.list_labels()?;
    if args.json {
        return print_json(&labels);
    }

    for label in &labels {
        println!("{}\t{}", label.rank(), label.name());
    }
    Ok(())
}

/// Print the permission catalog.
pub fn permissions(runtime: &Runtime, args: &OutputArgs) -> Result<()> {
    let catalog = runtime.catalog()?;
    let ids: Vec<&str> = catalog.iter().map(|id| id.as_str()).collect();
    if args.json {
        return print_json(&ids);
    }

    for id in ids {
        println!("{}", id);
    }
    Ok(())
}

/// Print every role with its permissions.
pub fn roles(runtime: &Runtime, args: &OutputArgs) -> Result<()> {
    let roles = runtime.stores.roles.list_roles()?;
    if args.json {
        return print_json(&roles);
    }

    for role in &roles {
        let permissions: Vec<&str> = role.permissions.iter().map(|p| p.as_str()).collect();
        println!("{}: {}", role.id, permissions.join(", "));
    }
    Ok(())
}

#[derive(Serialize)]
struct UserRow<'a> {
    email: &'a str,
    name: String,
    roles: Vec<&'a str>,
}

/// Print every user with their roles.
pub fn users(runtime: &Runtime, args: &OutputArgs) -> Result<()> {
    let users = runtime.stores.users.list_users()?;
    let rows: Vec<UserRow<'_>> = users
        .iter()
        .map(|user| UserRow {
            email: &user.email,
            name: user.full_name(),
            roles: user.roles.iter().map(String::as_str).collect(),
        })
        .collect();
    if args.json {
        return print_json(&rows);
    }

    for row in &rows {
        println!("{}\t{}\t{}", row.email, row.name, row.roles.join(","));
    }
    Ok(())
}
