use crate::error::AuthError;
use crate::services::auth::claims::ClaimSet;

/// Turns a bearer credential into a verified claim set.
///
/// Implementations are chosen once at start-up (`JWT_MODE`) and shared by every request.
pub trait TokenVerifier: Send + Sync + std::fmt::Debug {
    fn verify(&self, token: &str) -> Result<ClaimSet, AuthError>;
}
