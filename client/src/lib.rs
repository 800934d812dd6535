//! Clinic Cloud Admin Platform - Admin Client
//!
//! Client-side core for the administrative dashboard: session lifecycle,
//! typed API access, a normalized entity store, and the domain-scoped
//! authorization index used for role-assignment queries and cascade
//! removal. The view layer and the API server are external to this crate.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod authz;
pub mod config;
pub mod error;
pub mod permissions;
pub mod reconcile;
pub mod session;
pub mod store;

pub use api::ApiClient;
pub use authz::UserRoleIndex;
pub use config::Config;
pub use error::{Alert, ClientError, ClientResult};
pub use session::Session;
pub use store::Store;

/// Initialize tracing for the admin client process
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admin_client=debug,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
