//! Route-guard state machine.
//!
//! Wraps both the whole authenticated area (no role restriction) and
//! individual routes (explicit allow-list). With no allow-list, any
//! authenticated role passes.

use protocolos_core::Role;

use crate::session::Session;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Default landing page, also the target of role rejections.
pub const DEFAULT_LANDING: &str = "/dashboard";

/// Outcome of evaluating a guarded route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session status not yet resolved; render nothing.
    Checking,
    /// No session: redirect to the login screen, remembering where the
    /// visitor wanted to go for the optional post-login redirect.
    Denied { requested: String },
    /// Session present but its role is not in the allow-list: redirect to the
    /// default landing page (silently; this is not an error).
    RoleDenied,
    /// Render the guarded content.
    Allowed,
}

/// One guard instance per guarded route mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: Option<Vec<Role>>,
    state: RouteDecision,
}

impl RouteGuard {
    /// `allowed = None` means "any authenticated role".
    pub fn new(allowed: Option<Vec<Role>>) -> Self {
        Self {
            allowed,
            state: RouteDecision::Checking,
        }
    }

    pub fn state(&self) -> &RouteDecision {
        &self.state
    }

    /// Transition out of `Checking` once the session slot has been read.
    pub fn resolve(&mut self, session: Option<&Session>, requested: &str) -> &RouteDecision {
        self.state = match session {
            None => RouteDecision::Denied {
                requested: requested.to_string(),
            },
            Some(session) => match &self.allowed {
                Some(roles) if !roles.contains(&session.role) => RouteDecision::RoleDenied,
                _ => RouteDecision::Allowed,
            },
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use protocolos_core::UserId;

    use super::*;

    fn session(role: Role) -> Session {
        Session {
            user_id: UserId::new(1),
            email: "user@ipn.mx".into(),
            role,
            token: "jwt".into(),
        }
    }

    #[test]
    fn starts_checking() {
        let guard = RouteGuard::new(None);
        assert_eq!(*guard.state(), RouteDecision::Checking);
    }

    #[test]
    fn unauthenticated_is_denied_with_requested_path() {
        let mut guard = RouteGuard::new(None);
        let decision = guard.resolve(None, "/protocolos/7");
        assert_eq!(
            *decision,
            RouteDecision::Denied {
                requested: "/protocolos/7".into()
            }
        );
    }

    #[test]
    fn any_authenticated_role_passes_without_allow_list() {
        for role in Role::ALL {
            let mut guard = RouteGuard::new(None);
            assert_eq!(
                *guard.resolve(Some(&session(role)), "/dashboard"),
                RouteDecision::Allowed
            );
        }
    }

    #[test]
    fn wrong_role_is_role_denied_not_denied() {
        let mut guard = RouteGuard::new(Some(vec![Role::Admin]));
        let decision = guard.resolve(Some(&session(Role::Director)), "/usuarios");
        // Authenticated-but-wrong-role goes to the landing page, not to login.
        assert_eq!(*decision, RouteDecision::RoleDenied);
    }

    #[test]
    fn allow_list_admits_listed_roles() {
        let mut guard = RouteGuard::new(Some(vec![Role::Admin, Role::Director]));
        assert_eq!(
            *guard.resolve(Some(&session(Role::Director)), "/departamentos"),
            RouteDecision::Allowed
        );

        let mut guard = RouteGuard::new(Some(vec![Role::Admin, Role::Director]));
        assert_eq!(
            *guard.resolve(Some(&session(Role::Student)), "/departamentos"),
            RouteDecision::RoleDenied
        );
    }

    #[test]
    fn missing_session_wins_over_role_check() {
        let mut guard = RouteGuard::new(Some(vec![Role::Admin]));
        assert!(matches!(
            guard.resolve(None, "/usuarios"),
            RouteDecision::Denied { .. }
        ));
    }
}
