//! Document commands
//!
//! These act as a given user, so every one of them goes through the access
//! checks of the document service.

use anyhow::{Context, Result};
use clap::Args;
use clearance_runtime::{Principal, Reclassification, Runtime};
use serde::Serialize;

use super::print_json;

/// Arguments for the documents command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Email of the acting user
    #[clap(long = "as", value_name = "EMAIL")]
    pub email: String,

    /// Print JSON instead of text
    #[clap(long)]
    pub json: bool,
}

/// Arguments for commands on a single document
#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// Email of the acting user
    #[clap(long = "as", value_name = "EMAIL")]
    pub email: String,

    /// Name of the document
    #[clap(long, value_name = "NAME")]
    pub document: String,

    /// Print JSON instead of text
    #[clap(long)]
    pub json: bool,
}

fn principal(runtime: &Runtime, email: &str) -> Result<Principal> {
    runtime
        .principal(email)
        .with_context(|| format!("Cannot act as {}", email))
}

/// Print the documents the user can read.
pub fn list(runtime: &Runtime, args: &ListArgs) -> Result<()> {
    let principal = principal(runtime, &args.email)?;
    let documents = runtime.documents.list(&principal)?;
    if args.json {
        return print_json(&documents);
    }

    for document in &documents {
        println!("{}\t{}", document.name, document.label());
    }
    Ok(())
}

fn yes_no(allowed: bool) -> &'static str {
    if allowed {
        "yes"
    } else {
        "no"
    }
}

/// Print which actions the user may perform on a document.
pub fn check(runtime: &Runtime, args: &DocumentArgs) -> Result<()> {
    let principal = principal(runtime, &args.email)?;
    let access = runtime.documents.check(&principal, &args.document)?;
    if args.json {
        return print_json(&access);
    }

    println!(
        "{} ({}): read={} write={} upgrade={} downgrade={}",
        access.document,
        access.label,
        yes_no(access.read),
        yes_no(access.write),
        yes_no(access.upgrade),
        yes_no(access.downgrade)
    );
    Ok(())
}

#[derive(Serialize)]
struct Reclassified<'a> {
    document: &'a str,
    from: &'a str,
    to: &'a str,
}

fn report(reclassification: &Reclassification, json: bool) -> Result<()> {
    let document = &reclassification.document;
    if json {
        return print_json(&Reclassified {
            document: &document.name,
            from: reclassification.from.name(),
            to: document.label().name(),
        });
    }

    println!(
        "{}: {} -> {}",
        document.name,
        reclassification.from,
        document.label()
    );
    Ok(())
}

/// Move a document one level down as the user.
pub fn downgrade(runtime: &Runtime, args: &DocumentArgs) -> Result<()> {
    let principal = principal(runtime, &args.email)?;
    let reclassification = runtime
        .documents
        .downgrade_by_name(&principal, &args.document)?;
    report(&reclassification, args.json)
}

/// Move a document one level up as the user.
pub fn upgrade(runtime: &Runtime, args: &DocumentArgs) -> Result<()> {
    let principal = principal(runtime, &args.email)?;
    let reclassification = runtime
        .documents
        .upgrade_by_name(&principal, &args.document)?;
    report(&reclassification, args.json)
}
