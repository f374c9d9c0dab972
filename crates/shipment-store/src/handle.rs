//! SurrealDB connection handling
//!
//! Resolves where the record store lives and opens a connection to it.
//! Supports in-memory, cloud (WebSocket with credentials), an explicit URL,
//! and local on-disk persistence.

use std::path::PathBuf;

use surrealdb::engine::any::Any;
use surrealdb::opt::auth::{Database, Root};
use surrealdb::Surreal;
use tracing::{info, instrument};

use crate::error::StorageError;
use crate::storage_traits::StorageResult;

const DEFAULT_NAMESPACE: &str = "shiptrack";
const DEFAULT_DATABASE: &str = "main";
const DEFAULT_LOCAL_PATH: &str = ".shiptrack/db";

/// Configuration for SurrealDB Cloud connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudConfig {
    /// WebSocket endpoint URL (e.g., "wss://xxx.aws-use1.surrealdb.cloud")
    pub endpoint: String,
    /// Database username
    pub username: String,
    /// Database password
    pub password: String,
    /// Namespace (default: "shiptrack")
    pub namespace: String,
    /// Database name (default: "main")
    pub database: String,
    /// Whether this is a root user (true) or database user (false)
    pub is_root: bool,
}

impl CloudConfig {
    /// Create a new cloud configuration for a database user
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            is_root: false,
        }
    }

    /// Set custom namespace
    pub fn with_namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespace = ns.into();
        self
    }

    /// Set custom database
    pub fn with_database(mut self, db: impl Into<String>) -> Self {
        self.database = db.into();
        self
    }

    /// Set whether this is a root user
    pub fn with_root(mut self, is_root: bool) -> Self {
        self.is_root = is_root;
        self
    }
}

/// Where the record store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Volatile `mem://` database
    Memory,
    /// Authenticated remote database
    Cloud(CloudConfig),
    /// Any URL understood by `surrealdb::engine::any`, unauthenticated
    Url(String),
    /// `surrealkv://` directory on local disk
    Local(PathBuf),
}

impl StoreLocation {
    /// Resolve the location from environment variables
    ///
    /// Precedence:
    /// 1. SURREALDB_ENDPOINT + SURREALDB_USERNAME + SURREALDB_PASSWORD
    ///    (with optional SURREALDB_NAMESPACE, SURREALDB_DATABASE, SURREALDB_ROOT)
    /// 2. SURREALDB_URL
    /// 3. local persistence under `.shiptrack/db`
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same resolution as [`StoreLocation::from_env`] over an arbitrary lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let endpoint = lookup("SURREALDB_ENDPOINT");
        let username = lookup("SURREALDB_USERNAME");
        let password = lookup("SURREALDB_PASSWORD");

        if let (Some(endpoint), Some(username), Some(password)) = (endpoint, username, password) {
            let mut config = CloudConfig::new(endpoint, username, password).with_root(
                lookup("SURREALDB_ROOT")
                    .map(|v| v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            );
            if let Some(ns) = lookup("SURREALDB_NAMESPACE") {
                config = config.with_namespace(ns);
            }
            if let Some(db) = lookup("SURREALDB_DATABASE") {
                config = config.with_database(db);
            }
            return StoreLocation::Cloud(config);
        }

        if let Some(url) = lookup("SURREALDB_URL") {
            return StoreLocation::Url(url);
        }

        StoreLocation::Local(PathBuf::from(DEFAULT_LOCAL_PATH))
    }

    fn describe(&self) -> String {
        match self {
            StoreLocation::Memory => "mem://".to_string(),
            StoreLocation::Cloud(config) => config.endpoint.clone(),
            StoreLocation::Url(url) => url.clone(),
            StoreLocation::Local(path) => format!("surrealkv://{}", path.display()),
        }
    }
}

/// Open a connection and select namespace/database. Does not touch the schema.
#[instrument(skip_all, fields(location = %location.describe()))]
pub async fn connect(location: &StoreLocation) -> StorageResult<Surreal<Any>> {
    let (url, namespace, database) = match location {
        StoreLocation::Memory => ("mem://".to_string(), DEFAULT_NAMESPACE, DEFAULT_DATABASE),
        StoreLocation::Cloud(config) => (
            config.endpoint.clone(),
            config.namespace.as_str(),
            config.database.as_str(),
        ),
        StoreLocation::Url(url) => (url.clone(), DEFAULT_NAMESPACE, DEFAULT_DATABASE),
        StoreLocation::Local(path) => {
            std::fs::create_dir_all(path).map_err(|e| {
                StorageError::Connection(format!(
                    "Failed to create database directory {}: {}",
                    path.display(),
                    e
                ))
            })?;
            (
                format!("surrealkv://{}", path.display()),
                DEFAULT_NAMESPACE,
                DEFAULT_DATABASE,
            )
        }
    };

    let db = surrealdb::engine::any::connect(url.as_str())
        .await
        .map_err(|e| StorageError::Connection(format!("Failed to connect to {}: {}", url, e)))?;

    if let StoreLocation::Cloud(config) = location {
        if config.is_root {
            db.signin(Root {
                username: &config.username,
                password: &config.password,
            })
            .await
            .map_err(|e| StorageError::Connection(format!("Root authentication failed: {e}")))?;
        } else {
            db.signin(Database {
                namespace: &config.namespace,
                database: &config.database,
                username: &config.username,
                password: &config.password,
            })
            .await
            .map_err(|e| {
                StorageError::Connection(format!("Database authentication failed: {e}"))
            })?;
        }
    }

    db.use_ns(namespace)
        .use_db(database)
        .await
        .map_err(|e| {
            StorageError::Connection(format!("Failed to select namespace/database: {}", e))
        })?;

    info!("SurrealDB connected");
    Ok(db)
}
