//! `jobboard-infra` — in-memory persistence and the role directory.
//!
//! The stores own their consistency (interior locking); callers never hold a
//! lock across calls. Every read returns a clone, so role/permission changes
//! are visible to the next lookup with no caching in between.

pub mod applications;
pub mod directory;
pub mod jobs;
pub mod sessions;
pub mod store;
pub mod users;

pub use applications::ApplicationStore;
pub use directory::RoleDirectory;
pub use jobs::JobStore;
pub use sessions::SessionStore;
pub use store::InMemoryStore;
pub use users::UserStore;
