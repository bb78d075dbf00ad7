//! Route protection wrappers over the pure guard machine.

use leptos::*;
use leptos_router::{use_location, Redirect};
use protocolos_auth::{RouteDecision, RouteGuard, DEFAULT_LANDING, LOGIN_PATH};
use protocolos_core::Role;

use crate::session::use_session;

/// Renders its children only for an authenticated session whose role is in
/// `roles`; with no `roles`, any authenticated role passes. Unauthenticated
/// visitors go to the login screen with the requested path preserved;
/// wrong-role sessions go to the default landing page.
#[component]
pub fn RequireSession(
    #[prop(optional)] roles: Option<Vec<Role>>,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session();
    let location = use_location();

    move || {
        let mut guard = RouteGuard::new(roles.clone());
        let current = session.get();
        let decision = guard.resolve(current.as_ref(), &location.pathname.get()).clone();
        match decision {
            RouteDecision::Checking => ().into_view(),
            RouteDecision::Denied { requested } => {
                let path = format!("{LOGIN_PATH}?from={requested}");
                view! { <Redirect path=path/> }.into_view()
            }
            RouteDecision::RoleDenied => view! { <Redirect path=DEFAULT_LANDING/> }.into_view(),
            RouteDecision::Allowed => children().into_view(),
        }
    }
}
