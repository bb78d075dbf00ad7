//! User accounts screen (admin-only route).

use leptos::*;
use protocolos_core::{AccountPayload, Role, UserAccount, UserId};

use crate::api::{api_client, report_failure};
use crate::notify::use_notifier;
use crate::session::use_session;

#[component]
pub fn AccountsPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();

    let reload = create_rw_signal(0u32);
    let data = create_resource(
        move || reload.get(),
        move |_| async move {
            match api_client(session).list_accounts().await {
                Ok(accounts) => Some(accounts),
                Err(err) => {
                    report_failure(notifier, &err, "Error al cargar usuarios");
                    None
                }
            }
        },
    );

    let search = create_rw_signal(String::new());
    // "TODOS" or a wire role string.
    let role_filter = create_rw_signal("TODOS".to_string());

    let dialog_open = create_rw_signal(false);
    let editing = create_rw_signal(None::<UserId>);
    let pending_delete = create_rw_signal(None::<UserAccount>);

    let f_email = create_rw_signal(String::new());
    let f_password = create_rw_signal(String::new());
    let f_role = create_rw_signal(Role::Student.as_wire().to_string());

    let open_create = move |_| {
        editing.set(None);
        f_email.set(String::new());
        f_password.set(String::new());
        f_role.set(Role::Student.as_wire().to_string());
        dialog_open.set(true);
    };

    let open_edit = move |account: UserAccount| {
        editing.set(Some(account.id));
        f_email.set(account.email.clone());
        // Write-only: the password box always starts blank.
        f_password.set(String::new());
        f_role.set(account.role.as_wire().to_string());
        dialog_open.set(true);
    };

    let on_save = move |_| {
        let Some(role) = Role::from_wire(&f_role.get_untracked()) else {
            notifier.error("Selecciona un rol válido");
            return;
        };
        let payload = AccountPayload {
            email: f_email.get_untracked(),
            password: f_password.get_untracked(),
            role,
        };
        if payload.email.trim().is_empty() {
            notifier.error("El email es obligatorio");
            return;
        }
        let current_edit = editing.get_untracked();

        spawn_local(async move {
            let client = api_client(session);
            let result = match current_edit {
                Some(id) => client.update_account(id, &payload).await,
                None => client.create_account(&payload).await,
            };
            match result {
                Ok(()) => {
                    notifier.success(if current_edit.is_some() {
                        "Usuario actualizado correctamente"
                    } else {
                        "Cuenta de usuario creada"
                    });
                    dialog_open.set(false);
                    reload.update(|n| *n += 1);
                }
                Err(err) => {
                    report_failure(
                        notifier,
                        &err,
                        if current_edit.is_some() {
                            "Error al actualizar"
                        } else {
                            "Error al crear. Verifica los datos."
                        },
                    )
                }
            }
        });
    };

    let on_confirm_delete = move |_| {
        let Some(account) = pending_delete.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api_client(session).delete_account(account.id).await {
                Ok(()) => {
                    notifier.success("Usuario eliminado");
                    pending_delete.set(None);
                    reload.update(|n| *n += 1);
                }
                Err(err) => report_failure(notifier, &err, "Error al eliminar"),
            }
        });
    };

    view! {
        <div class="page">
            <header class="page-header">
                <h1>"Gestión de Cuentas"</h1>
                <button class="primary" on:click=open_create>
                    "Nueva Cuenta"
                </button>
            </header>

            <div class="toolbar">
                <input
                    class="search"
                    placeholder="Buscar por email..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select
                    prop:value=move || role_filter.get()
                    on:change=move |ev| role_filter.set(event_target_value(&ev))
                >
                    <option value="TODOS">"Todos los Roles"</option>
                    {Role::ALL
                        .iter()
                        .map(|role| {
                            view! { <option value=role.as_wire()>{role.label()}</option> }
                        })
                        .collect_view()}
                </select>
            </div>

            {move || match data.get() {
                None => view! { <p class="loading">"Cargando..."</p> }.into_view(),
                Some(None) => {
                    view! { <p class="error">"No se pudo cargar la información"</p> }.into_view()
                }
                Some(Some(accounts)) => {
                    let term = search.get();
                    let filter = role_filter.get();
                    let rows: Vec<UserAccount> = accounts
                        .iter()
                        .filter(|a| a.matches_search(&term))
                        .filter(|a| filter == "TODOS" || a.role.as_wire() == filter)
                        .cloned()
                        .collect();

                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Email"</th>
                                    <th>"Rol"</th>
                                    <th>"Creado"</th>
                                    <th>"Acciones"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {if rows.is_empty() {
                                    view! {
                                        <tr>
                                            <td class="empty" colspan="4">
                                                "No se encontraron cuentas"
                                            </td>
                                        </tr>
                                    }
                                        .into_view()
                                } else {
                                    rows.into_iter()
                                        .map(|account| {
                                            let row = account.clone();
                                            let created = account
                                                .created_at
                                                .map(|d| d.format("%d/%m/%Y").to_string())
                                                .unwrap_or_else(|| "—".to_string());
                                            view! {
                                                <tr>
                                                    <td>{account.email.clone()}</td>
                                                    <td>
                                                        <span class="badge">{account.role.label()}</span>
                                                    </td>
                                                    <td>{created}</td>
                                                    <td class="actions">
                                                        <button on:click={
                                                            let row = row.clone();
                                                            move |_| open_edit(row.clone())
                                                        }>"Editar"</button>
                                                        <button class="danger" on:click={
                                                            let row = row.clone();
                                                            move |_| pending_delete.set(Some(row.clone()))
                                                        }>"Eliminar"</button>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    }
                        .into_view()
                }
            }}

            <Show when=move || dialog_open.get() fallback=|| ()>
                <div class="dialog">
                    <h2>
                        {move || {
                            if editing.get().is_some() { "Editar Cuenta" } else { "Nueva Cuenta" }
                        }}
                    </h2>
                    <label>"Email"</label>
                    <input
                        type="email"
                        prop:value=move || f_email.get()
                        on:input=move |ev| f_email.set(event_target_value(&ev))
                    />
                    <label>"Contraseña"</label>
                    <input
                        type="password"
                        prop:value=move || f_password.get()
                        on:input=move |ev| f_password.set(event_target_value(&ev))
                    />
                    <label>"Rol"</label>
                    <select
                        prop:value=move || f_role.get()
                        on:change=move |ev| f_role.set(event_target_value(&ev))
                    >
                        {Role::ALL
                            .iter()
                            .map(|role| {
                                view! { <option value=role.as_wire()>{role.label()}</option> }
                            })
                            .collect_view()}
                    </select>
                    <footer>
                        <button on:click=move |_| dialog_open.set(false)>"Cancelar"</button>
                        <button class="primary" on:click=on_save>"Guardar"</button>
                    </footer>
                </div>
            </Show>

            <Show when=move || pending_delete.get().is_some() fallback=|| ()>
                <div class="dialog">
                    <h2>"¿Eliminar usuario permanentemente?"</h2>
                    <p>"Esta acción no se puede deshacer."</p>
                    <footer>
                        <button on:click=move |_| pending_delete.set(None)>"Cancelar"</button>
                        <button class="danger" on:click=on_confirm_delete>"Confirmar"</button>
                    </footer>
                </div>
            </Show>
        </div>
    }
}
