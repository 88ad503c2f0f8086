use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::services::{AuthService, DashboardService, LeadService, TrackingService};
use crate::storage::{SeaOrmStorage, StorageFactory};
use crate::utils::password::hash_password;

/// Seed admin account, created on first start when no admin exists
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@email.com";
pub const DEFAULT_ADMIN_NAME: &str = "Admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub lead_service: LeadService,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub tracking_service: TrackingService,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub admin_prefix: String,
}

/// Prepare the server startup context
///
/// Connects storage, runs migrations, seeds the default admin account and
/// wires the services.
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|e| anyhow::anyhow!("Failed to install rustls crypto provider: {:?}", e))?;

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    seed_default_admin(&storage).await?;

    let config = crate::config::get_config();
    let route_config = RouteConfig {
        admin_prefix: config.routes.admin_prefix.clone(),
    };

    let context = StartupContext {
        lead_service: LeadService::new(storage.clone()),
        auth_service: AuthService::new(storage.clone()),
        dashboard_service: DashboardService::new(storage.clone()),
        tracking_service: TrackingService::new(storage.clone()),
        storage,
        route_config,
    };

    debug!(
        "Pre-startup processing completed in {:?}",
        start_time.elapsed()
    );
    Ok(context)
}

/// Create the default admin on first start
///
/// Existing accounts are never touched; use `reset-password` to change
/// credentials.
pub async fn seed_default_admin(storage: &SeaOrmStorage) -> Result<()> {
    if storage
        .find_admin_by_email(DEFAULT_ADMIN_EMAIL)
        .await
        .context("Admin lookup failed during seeding")?
        .is_some()
    {
        debug!("Default admin already present, skipping seed");
        return Ok(());
    }

    let hashed = hash_password(DEFAULT_ADMIN_PASSWORD)
        .map_err(|e| anyhow::anyhow!("Failed to hash seed password: {}", e))?;
    storage
        .upsert_admin(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME, &hashed)
        .await
        .context("Failed to seed default admin")?;

    warn!(
        "Seeded default admin account {} with the default password, change it before going live",
        DEFAULT_ADMIN_EMAIL
    );
    Ok(())
}
