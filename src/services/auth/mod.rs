pub mod claims;
pub mod encrypted;
pub mod factory;
pub mod roles;
pub mod signed;
pub mod verifier;

pub use claims::{AuthUser, ClaimKeys, ClaimSet, DecodedToken};
pub use factory::build_verifier;
pub use roles::RolePolicy;
pub use verifier::TokenVerifier;
