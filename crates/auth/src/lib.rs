//! `jobboard-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod password;
pub mod permissions;
pub mod policy;
pub mod principal;
pub mod roles;
pub mod token;
pub mod user;

pub use password::{hash_password, verify_password, CredentialError};
pub use permissions::Permission;
pub use policy::{decide, Action, PolicyError};
pub use principal::Principal;
pub use roles::Role;
pub use token::{generate_token, token_digest};
pub use user::{ProfileUpdate, User};
