//! Role membership check for protected routes.

use crate::error::AuthError;

pub const DEFAULT_ROLE_ERROR_MESSAGE: &str = "You do not have the authorized role to access this route. Your current role is \":user_role\", but one of the following roles is required: :required_roles";

const USER_ROLE_PLACEHOLDER: &str = ":user_role";
const REQUIRED_ROLES_PLACEHOLDER: &str = ":required_roles";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePolicy {
    pub case_sensitive: bool,
    pub error_message: String,
}

impl Default for RolePolicy {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            error_message: DEFAULT_ROLE_ERROR_MESSAGE.to_string(),
        }
    }
}

impl RolePolicy {
    /// Pass iff `role` is non-empty and equal to one of `required`.
    pub fn authorize<S: AsRef<str>>(
        &self,
        role: Option<&str>,
        required: &[S],
    ) -> Result<(), AuthError> {
        let allowed = match role {
            Some(role) if !role.is_empty() => {
                if self.case_sensitive {
                    required.iter().any(|r| r.as_ref() == role)
                } else {
                    let role = role.to_lowercase();
                    required.iter().any(|r| r.as_ref().to_lowercase() == role)
                }
            }
            _ => false,
        };

        if allowed {
            Ok(())
        } else {
            Err(AuthError::RoleForbidden(self.render(role, required)))
        }
    }

    /// Substitute the caller's role (as presented) and the required roles into the template.
    pub fn render<S: AsRef<str>>(&self, role: Option<&str>, required: &[S]) -> String {
        let required = required
            .iter()
            .map(|r| r.as_ref())
            .collect::<Vec<&str>>()
            .join(", ");

        let substitutions = [
            (USER_ROLE_PLACEHOLDER, role.unwrap_or_default()),
            (REQUIRED_ROLES_PLACEHOLDER, required.as_str()),
        ];
        substitute(&self.error_message, &substitutions)
    }
}

/// Replace placeholders in a single left-to-right pass; inserted values are never rescanned.
fn substitute(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match substitutions
            .iter()
            .find(|(placeholder, _)| tail.starts_with(placeholder))
        {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push(':');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
