//! Application root: router, layout shell, and route-level guards.

use leptos::*;
use leptos_router::*;
use protocolos_core::Role;

use crate::guard::RequireSession;
use crate::notify::{provide_notifier, NotificationArea};
use crate::pages::accounts::AccountsPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::departments::DepartmentsPage;
use crate::pages::directors::DirectorsPage;
use crate::pages::login::LoginPage;
use crate::pages::protocol_detail::ProtocolDetailPage;
use crate::pages::protocol_form::ProtocolFormPage;
use crate::pages::protocols_list::ProtocolsListPage;
use crate::pages::students::StudentsPage;
use crate::session::{provide_session, use_session};

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_session();
    provide_notifier();

    view! {
        <Router>
            <NotificationArea/>
            <Routes>
                <Route path="/login" view=LoginPage/>
                <Route
                    path=""
                    view=|| {
                        view! {
                            <RequireSession>
                                <Shell/>
                            </RequireSession>
                        }
                    }
                >
                    <Route path="dashboard" view=DashboardPage/>
                    <Route path="alumnos" view=StudentsPage/>
                    <Route path="directores" view=DirectorsPage/>
                    <Route path="protocolos" view=ProtocolsListPage/>
                    <Route
                        path="protocolos/nuevo"
                        view=|| {
                            view! {
                                <RequireSession roles=vec![Role::Admin, Role::Director]>
                                    <ProtocolFormPage/>
                                </RequireSession>
                            }
                        }
                    />
                    <Route
                        path="protocolos/editar/:id"
                        view=|| {
                            view! {
                                <RequireSession roles=vec![Role::Admin, Role::Director]>
                                    <ProtocolFormPage/>
                                </RequireSession>
                            }
                        }
                    />
                    <Route path="protocolos/:id" view=ProtocolDetailPage/>
                    <Route
                        path="usuarios"
                        view=|| {
                            view! {
                                <RequireSession roles=vec![Role::Admin]>
                                    <AccountsPage/>
                                </RequireSession>
                            }
                        }
                    />
                    <Route
                        path="departamentos"
                        view=|| {
                            view! {
                                <RequireSession roles=vec![Role::Admin, Role::Director]>
                                    <DepartmentsPage/>
                                </RequireSession>
                            }
                        }
                    />
                    <Route path="" view=|| view! { <Redirect path="/dashboard"/> }/>
                    <Route path="*any" view=|| view! { <Redirect path="/dashboard"/> }/>
                </Route>
            </Routes>
        </Router>
    }
}

/// Authenticated layout: navigation plus the routed screen.
///
/// The accounts entry is admin-only and the departments entry is hidden from
/// students, mirroring the route guards behind them.
#[component]
fn Shell() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let show_accounts = move || session.get().is_some_and(|s| s.role == Role::Admin);
    let show_departments = move || session.get().is_some_and(|s| s.role != Role::Student);

    let on_logout = move |_| {
        session.logout();
        navigate(protocolos_auth::LOGIN_PATH, Default::default());
    };

    view! {
        <div class="shell">
            <nav class="sidebar">
                <span class="brand">"Protocolos ESCOM"</span>
                <A href="/dashboard">"Inicio"</A>
                <A href="/protocolos">"Protocolos"</A>
                <A href="/alumnos">"Alumnos"</A>
                <A href="/directores">"Directores"</A>
                <Show when=show_departments fallback=|| ()>
                    <A href="/departamentos">"Departamentos"</A>
                </Show>
                <Show when=show_accounts fallback=|| ()>
                    <A href="/usuarios">"Usuarios"</A>
                </Show>
                <div class="session-box">
                    {move || {
                        session
                            .get()
                            .map(|s| {
                                view! {
                                    <span class="session-email">{s.email.clone()}</span>
                                    <span class="session-role">{s.role.label()}</span>
                                }
                            })
                    }}
                    <button on:click=on_logout>"Cerrar sesión"</button>
                </div>
            </nav>
            <main class="content">
                <Outlet/>
            </main>
        </div>
    }
}
