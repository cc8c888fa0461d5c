//! Clearance Runtime - configuration, bootstrap and services
//!
//! This crate wires the policy engine to a set of stores: it loads the
//! runtime configuration, seeds labels, permissions, roles and demo data, and
//! exposes the document and user services that enforce access control on
//! every call.

pub mod service;
pub mod system;

use std::sync::Arc;

use anyhow::Result;
use clearance_core::types::PermissionId;
use clearance_policy::{LabelHierarchy, PermissionCatalog, Stores};
use tracing::info;

pub use service::{
    DocumentAccess, DocumentService, Principal, Reclassification, ServiceError, UserService,
};
pub use system::{BootstrapReport, RuntimeConfig};

/// Runtime facade that provides a unified interface to the Clearance runtime.
pub struct Runtime {
    /// The configuration the runtime was built from
    pub config: RuntimeConfig,

    /// The collaborator stores
    pub stores: Stores,

    /// Access-controlled document operations
    pub documents: Arc<DocumentService>,

    /// Access-controlled user management
    pub users: Arc<UserService>,

    /// System component for bootstrap
    pub system: Arc<system::bootstrap::System>,
}

impl Runtime {
    /// Create a new Runtime instance from a configuration file
    pub async fn new(config_path: Option<&str>) -> Result<Self> {
        let config = RuntimeConfig::load(config_path).await?;
        Self::with_config(config)
    }

    /// Create a new Runtime instance over fresh in-memory stores
    pub fn with_config(config: RuntimeConfig) -> Result<Self> {
        Self::with_stores(config, Stores::in_memory())
    }

    /// Create a new Runtime instance over the given, empty, stores
    pub fn with_stores(config: RuntimeConfig, stores: Stores) -> Result<Self> {
        info!("Initializing Clearance Runtime");

        config.validate()?;

        let system = Arc::new(system::bootstrap::System::new(config.clone(), stores.clone()));
        let documents = Arc::new(DocumentService::new(stores.clone()));
        let users = Arc::new(UserService::new(
            stores.clone(),
            PermissionId::new(config.admin_permission.clone()),
        ));

        info!("Clearance Runtime initialized successfully");

        Ok(Self {
            config,
            stores,
            documents,
            users,
            system,
        })
    }

    /// Seed the stores
    pub fn start(&self) -> Result<BootstrapReport> {
        info!("Starting Clearance Runtime");
        self.system.bootstrap()
    }

    /// Authenticate a caller by email.
    ///
    /// Credential checks belong to the caller; this only resolves the
    /// account.
    pub fn principal(&self, email: &str) -> std::result::Result<Principal, ServiceError> {
        let user = self.stores.users.get_user_by_email(email)?;
        Ok(Principal::new(user.id))
    }

    /// The label hierarchy as currently stored
    pub fn hierarchy(&self) -> Result<LabelHierarchy> {
        Ok(LabelHierarchy::new(self.stores.labels.list_labels()?)?)
    }

    /// The permission catalog of the stored hierarchy
    pub fn catalog(&self) -> Result<PermissionCatalog> {
        Ok(PermissionCatalog::with_admin_permission(
            &self.hierarchy()?,
            PermissionId::new(self.config.admin_permission.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_start() {
        let runtime = Runtime::with_config(RuntimeConfig::default()).unwrap();
        let report = runtime.start().unwrap();
        assert_eq!(report.labels, 4);

        assert_eq!(runtime.hierarchy().unwrap().len(), 4);
        assert_eq!(runtime.catalog().unwrap().len(), 15);
        assert!(runtime.principal("SECRET.USER@email.com").is_ok());
        assert!(matches!(
            runtime.principal("nobody@email.com"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_runtime_new_with_defaults() {
        let runtime = Runtime::new(None).await.unwrap();
        runtime.start().unwrap();
        assert_eq!(runtime.stores.documents.list_documents().unwrap().len(), 12);
    }
}
