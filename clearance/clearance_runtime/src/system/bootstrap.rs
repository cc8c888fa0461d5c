//! System Bootstrap for Clearance Runtime
//!
//! Seeds the stores in a fixed order: labels, then the permission catalog,
//! then the standard roles, then demo users and documents.

use anyhow::{Context, Result};
use clearance_core::types::{Document, NewUser, PermissionId, User};
use clearance_policy::{LabelHierarchy, PermissionCatalog, RolePermissionResolver, Stores};
use clearance_policy::engine::SYSTEM_ADMIN_ROLE;
use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::RuntimeConfig;

/// Errors that can occur during bootstrap
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Phase {0:?} bootstrap failed: {1}")]
    PhaseFailed(BootstrapPhase, String),

    #[error("System already bootstrapped")]
    AlreadyBootstrapped,

    #[error("An earlier bootstrap failed; the stores may be partially seeded")]
    PreviouslyFailed,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Bootstrap phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BootstrapPhase {
    /// Bootstrap has not been attempted
    NotStarted = 0,

    /// Phase 1: Label hierarchy
    Labels = 1,

    /// Phase 2: Permission catalog
    Permissions = 2,

    /// Phase 3: Standard roles
    Roles = 3,

    /// Phase 4: Demo users
    Users = 4,

    /// Phase 5: Demo documents
    Documents = 5,

    /// System is fully bootstrapped
    Complete = 6,

    /// A phase failed. Failure is terminal: seeding is not rolled back and
    /// cannot be retried on the same stores.
    Failed = 7,
}

/// What a bootstrap run created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    /// Labels created
    pub labels: usize,

    /// Permissions created
    pub permissions: usize,

    /// Roles created
    pub roles: usize,

    /// Users created
    pub users: usize,

    /// Documents created
    pub documents: usize,
}

/// `TopSecret` as `Top Secret`.
fn spaced(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// `TopSecret` as `top_secret`.
fn snake(name: &str) -> String {
    spaced(name).to_ascii_lowercase().replace(' ', "_")
}

/// State of the system
pub struct System {
    /// System configuration
    config: RuntimeConfig,

    /// The stores being seeded
    stores: Stores,

    /// Current bootstrap phase
    phase: Mutex<BootstrapPhase>,
}

impl System {
    /// Create a new system
    pub fn new(config: RuntimeConfig, stores: Stores) -> Self {
        Self {
            config,
            stores,
            phase: Mutex::new(BootstrapPhase::NotStarted),
        }
    }

    /// The phase the system has reached.
    pub fn phase(&self) -> BootstrapPhase {
        *self.phase.lock()
    }

    fn enter(&self, phase: BootstrapPhase) {
        info!("Bootstrap Phase {}: {:?}", phase as u8, phase);
        *self.phase.lock() = phase;
    }

    fn failed(phase: BootstrapPhase) -> impl Fn(clearance_core::Error) -> BootstrapError {
        move |err| BootstrapError::PhaseFailed(phase, err.to_string())
    }

    /// Bootstrap the system
    ///
    /// Runs at most once. The phase lock is held while the run is claimed, so
    /// concurrent callers see [`BootstrapError::AlreadyBootstrapped`]; after a
    /// failed run every later call sees [`BootstrapError::PreviouslyFailed`].
    pub fn bootstrap(&self) -> Result<BootstrapReport> {
        {
            let mut phase = self.phase.lock();
            match *phase {
                BootstrapPhase::NotStarted => *phase = BootstrapPhase::Labels,
                BootstrapPhase::Failed => return Err(BootstrapError::PreviouslyFailed.into()),
                _ => return Err(BootstrapError::AlreadyBootstrapped.into()),
            }
        }

        info!("Starting system bootstrap");
        match self.run() {
            Ok(report) => {
                *self.phase.lock() = BootstrapPhase::Complete;
                info!("System bootstrap complete: {:?}", report);
                Ok(report)
            }
            Err(err) => {
                let failed_in = std::mem::replace(&mut *self.phase.lock(), BootstrapPhase::Failed);
                warn!("System bootstrap failed in {:?}: {:#}", failed_in, err);
                Err(err)
            }
        }
    }

    fn run(&self) -> Result<BootstrapReport> {
        self.config
            .validate()
            .map_err(|e| BootstrapError::ConfigError(format!("{:#}", e)))?;

        let mut report = BootstrapReport::default();

        self.enter(BootstrapPhase::Labels);
        let hierarchy = self.seed_labels(&mut report)?;

        self.enter(BootstrapPhase::Permissions);
        let catalog = self.seed_permissions(&hierarchy, &mut report)?;

        self.enter(BootstrapPhase::Roles);
        self.seed_roles(&catalog, &mut report)?;

        if self.config.seed_demo_data {
            self.enter(BootstrapPhase::Users);
            self.seed_users(&hierarchy, &mut report)?;

            self.enter(BootstrapPhase::Documents);
            self.seed_documents(&hierarchy, &mut report)?;
        } else {
            info!("Skipping demo data");
        }

        Ok(report)
    }

    fn seed_labels(&self, report: &mut BootstrapReport) -> Result<LabelHierarchy> {
        let hierarchy = LabelHierarchy::from_names(self.config.labels.iter().cloned())
            .map_err(|e| BootstrapError::ConfigError(e.to_string()))?;
        if hierarchy.is_empty() {
            return Err(BootstrapError::ConfigError("No labels configured".to_string()).into());
        }

        for label in hierarchy.iter() {
            self.stores
                .labels
                .add_label(label.clone())
                .map_err(Self::failed(BootstrapPhase::Labels))?;
            report.labels += 1;
        }

        debug!("Labels: {:?}", hierarchy);
        Ok(hierarchy)
    }

    fn seed_permissions(
        &self,
        hierarchy: &LabelHierarchy,
        report: &mut BootstrapReport,
    ) -> Result<PermissionCatalog> {
        let catalog = PermissionCatalog::with_admin_permission(
            hierarchy,
            PermissionId::new(self.config.admin_permission.clone()),
        );

        for permission in catalog.to_permissions() {
            self.stores
                .permissions
                .add_permission(permission)
                .map_err(Self::failed(BootstrapPhase::Permissions))?;
            report.permissions += 1;
        }

        Ok(catalog)
    }

    fn seed_roles(&self, catalog: &PermissionCatalog, report: &mut BootstrapReport) -> Result<()> {
        for role in RolePermissionResolver::for_catalog(catalog).standard_roles() {
            debug!("Role {}: {} permissions", role.id, role.permissions.len());
            self.stores
                .roles
                .add_role(role)
                .map_err(Self::failed(BootstrapPhase::Roles))?;
            report.roles += 1;
        }

        Ok(())
    }

    /// One user per level, an administrator for every level that has an
    /// administrator role, and the system administrator.
    ///
    /// Level administrators also hold the level role, except at the top of the
    /// hierarchy.
    fn demo_users(&self, hierarchy: &LabelHierarchy) -> Vec<NewUser> {
        let hash = self.config.demo_password_hash.as_str();
        let highest = hierarchy.highest().map(|label| label.rank());
        let mut users = Vec::new();

        for label in hierarchy.iter() {
            let first_name = spaced(label.name());
            let stem = snake(label.name());
            let level_role = RolePermissionResolver::level_role_id(label);

            users.push(NewUser::new(
                first_name.clone(),
                "User",
                format!("{}.user@email.com", stem),
                hash,
                [level_role.clone()],
            ));

            if hierarchy.adjacent_below(label.rank()).is_some() {
                let admin_role = RolePermissionResolver::admin_role_id(label);
                let roles = if Some(label.rank()) == highest {
                    vec![admin_role]
                } else {
                    vec![level_role, admin_role]
                };
                users.push(NewUser::new(
                    first_name,
                    "Admin",
                    format!("{}.admin@email.com", stem),
                    hash,
                    roles,
                ));
            }
        }

        users.push(NewUser::new(
            "System",
            "Admin",
            "system.admin@email.com",
            hash,
            [SYSTEM_ADMIN_ROLE],
        ));

        users
    }

    fn seed_users(&self, hierarchy: &LabelHierarchy, report: &mut BootstrapReport) -> Result<()> {
        for new_user in self.demo_users(hierarchy) {
            let user = User::new(new_user);
            debug!("User {} with roles {:?}", user.email, user.roles);
            self.stores
                .users
                .add_user(user)
                .map_err(Self::failed(BootstrapPhase::Users))?;
            report.users += 1;
        }

        Ok(())
    }

    fn seed_documents(
        &self,
        hierarchy: &LabelHierarchy,
        report: &mut BootstrapReport,
    ) -> Result<()> {
        let labels: Vec<_> = hierarchy.iter().collect();

        for (i, label) in labels.iter().cycle().take(self.config.demo_documents).enumerate() {
            let name = format!("Document{}.txt", i + 1);
            let contents = format!("{} contents of {}.", spaced(label.name()), name);

            self.stores
                .documents
                .add_document(Document::new(name, (*label).clone(), contents))
                .map_err(Self::failed(BootstrapPhase::Documents))
                .context("Failed to seed demo documents")?;
            report.documents += 1;
        }

        Ok(())
    }
}
