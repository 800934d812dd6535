//! Domain models for the Clinic Cloud Admin Platform

mod clinic;
mod location;
mod organization;
mod role;
mod user;
mod user_role;

pub use clinic::*;
pub use location::*;
pub use organization::*;
pub use role::*;
pub use user::*;
pub use user_role::*;

/// Anything the normalized client cache can key by server-assigned ID.
///
/// An empty ID marks an entity that has not been created server-side yet.
pub trait Entity {
    fn id(&self) -> &str;
}
