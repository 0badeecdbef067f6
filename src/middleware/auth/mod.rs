pub mod access;
pub mod role;

pub use access::{authenticate, bearer_token};
pub use role::{RoleGuard, require_roles};
