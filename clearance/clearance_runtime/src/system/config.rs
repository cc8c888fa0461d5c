//! Configuration for Clearance Runtime
//!
//! Handles loading and validating runtime configuration.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use clearance_core::types::{
    parse_permission, validate_label_name, PermissionId, ADMIN_PERMISSION,
};
use clearance_policy::{LabelHierarchy, PermissionCatalog, RolePermissionResolver};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

/// Errors that can occur in configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Label names, least sensitive first
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,

    /// The administrative permission id
    #[serde(default = "default_admin_permission")]
    pub admin_permission: String,

    /// Whether to seed demo users and documents
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,

    /// Number of demo documents to seed
    #[serde(default = "default_demo_documents")]
    pub demo_documents: usize,

    /// Opaque password hash given to every demo user
    #[serde(default = "default_demo_password_hash")]
    pub demo_password_hash: String,

    /// Default log filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_labels() -> Vec<String> {
    ["Unclassified", "Confidential", "Secret", "TopSecret"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_admin_permission() -> String {
    ADMIN_PERMISSION.to_string()
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_demo_documents() -> usize {
    12
}

fn default_demo_password_hash() -> String {
    "test".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            admin_permission: default_admin_permission(),
            seed_demo_data: default_seed_demo_data(),
            demo_documents: default_demo_documents(),
            demo_password_hash: default_demo_password_hash(),
            log_level: default_log_level(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a file
    ///
    /// Files ending in `.toml` are read as TOML, anything else as JSON. A
    /// missing file falls back to the defaults.
    pub async fn load(path: Option<&str>) -> Result<Self> {
        let mut config = RuntimeConfig::default();

        if let Some(path) = path {
            info!("Loading configuration from {}", path);

            if !Path::new(path).exists() {
                warn!("Configuration file not found: {}", path);
                return Ok(config);
            }

            let content = fs::read_to_string(path)
                .await
                .context(format!("Failed to read configuration file: {}", path))?;

            config = Self::parse(path, &content)
                .context(format!("Failed to parse configuration file: {}", path))?;
        } else {
            info!("No configuration file specified, using defaults");
        }

        config.validate()?;

        Ok(config)
    }

    fn parse(path: &str, content: &str) -> std::result::Result<Self, ConfigError> {
        let is_toml = Path::new(path)
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
        } else {
            serde_json::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.labels.is_empty() {
            return Err(ConfigError::Invalid("At least one label is required".to_string()).into());
        }

        let mut seen = HashSet::new();
        for name in &self.labels {
            validate_label_name(name)
                .map_err(|e| ConfigError::Invalid(format!("Label {:?}: {}", name, e)))?;
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Invalid(format!("Duplicate label {}", name)).into());
            }
        }

        if self.admin_permission.is_empty() {
            return Err(
                ConfigError::Invalid("Admin permission cannot be empty".to_string()).into(),
            );
        }

        // The admin permission must not read as a label-scoped one.
        if parse_permission(&self.admin_permission).is_some() {
            return Err(ConfigError::Invalid(format!(
                "Admin permission {} collides with a label permission",
                self.admin_permission
            ))
            .into());
        }

        // Role ids land in effective permissions next to permission ids.
        let hierarchy = LabelHierarchy::from_names(self.labels.iter().cloned())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let catalog = PermissionCatalog::with_admin_permission(
            &hierarchy,
            PermissionId::new(self.admin_permission.clone()),
        );
        RolePermissionResolver::for_catalog(&catalog)
            .validate_role_ids()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.seed_demo_data && self.demo_password_hash.is_empty() {
            warn!("Demo users will be seeded with an empty password hash");
        }

        Ok(())
    }

    /// Merge with another configuration
    pub fn merge(&mut self, other: RuntimeConfig) {
        if !other.labels.is_empty() {
            self.labels = other.labels;
        }

        if !other.admin_permission.is_empty() {
            self.admin_permission = other.admin_permission;
        }

        self.seed_demo_data = other.seed_demo_data;
        self.demo_documents = other.demo_documents;

        if !other.demo_password_hash.is_empty() {
            self.demo_password_hash = other.demo_password_hash;
        }

        if !other.log_level.is_empty() {
            self.log_level = other.log_level;
        }
    }
}
