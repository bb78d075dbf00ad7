//! Login screen.

use leptos::*;
use leptos_router::{use_navigate, use_query_map};
use protocolos_auth::{Session, DEFAULT_LANDING};
use protocolos_client::{ApiClient, ApiError};
use protocolos_core::Role;

use crate::api::api_base_url;
use crate::notify::use_notifier;
use crate::session::use_session;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();
    let navigate = use_navigate();
    let query = use_query_map();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let busy = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);

        let navigate = navigate.clone();
        // Post-login redirect target preserved by the route guard, if any.
        let target = query
            .with_untracked(|q| q.get("from").cloned())
            .filter(|from| from.starts_with('/'))
            .unwrap_or_else(|| DEFAULT_LANDING.to_string());

        spawn_local(async move {
            let client = ApiClient::new(api_base_url());
            let result = client
                .login(&email.get_untracked(), &password.get_untracked())
                .await;

            match result {
                Ok(record) => {
                    let name = greeting_name(&record).await;
                    session.login(record);
                    notifier.success(format!("Bienvenido, {name}"));
                    navigate(&target, Default::default());
                }
                Err(ApiError::Unauthorized) => notifier.error("Credenciales incorrectas."),
                Err(err) => {
                    tracing::warn!(%err, "login failed");
                    notifier.error("Error de conexión o servidor.");
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-screen">
            <form class="login-card" on:submit=on_submit>
                <h1>"Gestión de Protocolos"</h1>
                <label for="email">"Correo institucional"</label>
                <input
                    id="email"
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <label for="password">"Contraseña"</label>
                <input
                    id="password"
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Verificando..." } else { "Iniciar sesión" }}
                </button>
            </form>
        </div>
    }
}

/// Best-effort profile lookup for the greeting; falls back to the email and
/// never blocks the login.
async fn greeting_name(record: &Session) -> String {
    let client = ApiClient::with_token(api_base_url(), record.token.clone());
    let profile_name = match record.role {
        Role::Admin => return "Administrador".to_string(),
        Role::Student => client
            .student_by_account(record.user_id)
            .await
            .map(|s| s.first_name),
        Role::Director => client
            .director_by_account(record.user_id)
            .await
            .map(|d| d.first_name),
    };

    match profile_name {
        Ok(name) if !name.is_empty() => name,
        _ => record.email.clone(),
    }
}
