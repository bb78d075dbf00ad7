//! Directors screen.
//!
//! Visibility follows the shared policy: non-admins see only directors
//! reachable through their own protocols (plus themselves when they are a
//! director). The account selector offers director accounts only; both the
//! department and the account link are required on save.

use leptos::*;
use protocolos_auth::policy;
use protocolos_core::{DepartmentId, Director, DirectorPayload, Role, UserId, WorkerId};

use crate::api::{api_client, report_failure};
use crate::notify::use_notifier;
use crate::session::use_session;

#[component]
pub fn DirectorsPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();

    let reload = create_rw_signal(0u32);
    let data = create_resource(
        move || reload.get(),
        move |_| async move {
            let client = api_client(session);
            match futures::try_join!(
                client.list_directors(),
                client.list_departments(),
                client.list_accounts(),
                client.list_protocols(),
            ) {
                Ok(value) => Some(value),
                Err(err) => {
                    report_failure(notifier, &err, "Error al cargar datos");
                    None
                }
            }
        },
    );

    let search = create_rw_signal(String::new());
    let dialog_open = create_rw_signal(false);
    let editing = create_rw_signal(None::<WorkerId>);
    let pending_delete = create_rw_signal(None::<Director>);

    let f_first = create_rw_signal(String::new());
    let f_paternal = create_rw_signal(String::new());
    let f_maternal = create_rw_signal(String::new());
    let f_school = create_rw_signal(String::new());
    let f_title = create_rw_signal(String::new());
    let f_phone = create_rw_signal(String::new());
    let f_department = create_rw_signal(String::new());
    let f_account = create_rw_signal(String::new());

    let open_create = move |_| {
        editing.set(None);
        f_first.set(String::new());
        f_paternal.set(String::new());
        f_maternal.set(String::new());
        f_school.set("ESCOM".to_string());
        f_title.set("Docente".to_string());
        f_phone.set(String::new());
        f_department.set(String::new());
        f_account.set(String::new());
        dialog_open.set(true);
    };

    let open_edit = move |director: Director| {
        editing.set(Some(director.worker_id));
        f_first.set(director.first_name.clone());
        f_paternal.set(director.paternal_surname.clone());
        f_maternal.set(director.maternal_surname.clone());
        f_school.set(director.school.clone());
        f_title.set(director.title.clone());
        f_phone.set(director.phone.clone());
        f_department.set(
            director
                .department_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
        );
        f_account.set(
            director
                .account_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
        );
        dialog_open.set(true);
    };

    let on_save = move |_| {
        let Ok(department) = f_department.get_untracked().parse::<DepartmentId>() else {
            notifier.error("Debes seleccionar un departamento");
            return;
        };
        let Ok(account) = f_account.get_untracked().parse::<UserId>() else {
            notifier.error("Debes asociar una cuenta de usuario");
            return;
        };
        let payload = DirectorPayload {
            first_name: f_first.get_untracked(),
            paternal_surname: f_paternal.get_untracked(),
            maternal_surname: f_maternal.get_untracked(),
            school: f_school.get_untracked(),
            title: f_title.get_untracked(),
            phone: f_phone.get_untracked(),
            department: department.into(),
            account: account.into(),
        };
        let current_edit = editing.get_untracked();

        spawn_local(async move {
            let client = api_client(session);
            let result = match current_edit {
                Some(key) => client.update_director(key, &payload).await,
                None => client.create_director(&payload).await,
            };
            match result {
                Ok(()) => {
                    notifier.success(if current_edit.is_some() {
                        "Director actualizado"
                    } else {
                        "Director creado"
                    });
                    dialog_open.set(false);
                    reload.update(|n| *n += 1);
                }
                Err(err) => report_failure(notifier, &err, "Error al guardar"),
            }
        });
    };

    let on_confirm_delete = move |_| {
        let Some(director) = pending_delete.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api_client(session).delete_director(director.worker_id).await {
                Ok(()) => {
                    notifier.success("Director eliminado");
                    pending_delete.set(None);
                    reload.update(|n| *n += 1);
                }
                Err(err) => report_failure(notifier, &err, "Error al eliminar"),
            }
        });
    };

    let can_manage = move || {
        session
            .viewer()
            .is_some_and(|v| policy::can_manage_catalog(&v))
    };

    view! {
        <div class="page">
            <header class="page-header">
                <h1>"Gestión de Directores"</h1>
                <Show when=can_manage fallback=|| ()>
                    <button class="primary" on:click=open_create>
                        "Nuevo Director"
                    </button>
                </Show>
            </header>

            <input
                class="search"
                placeholder="Buscar por nombre o departamento..."
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />

            {move || match data.get() {
                None => view! { <p class="loading">"Cargando..."</p> }.into_view(),
                Some(None) => {
                    view! { <p class="error">"No se pudo cargar la información"</p> }.into_view()
                }
                Some(Some((directors, departments, accounts, protocols))) => {
                    let Some(viewer) = session.viewer() else {
                        return ().into_view();
                    };
                    let admin = policy::can_manage_catalog(&viewer);
                    let term = search.get();
                    let rows: Vec<Director> = policy::visible_directors(
                            &viewer,
                            &protocols,
                            &directors,
                        )
                        .into_iter()
                        .filter(|d| d.matches_search(&term))
                        .cloned()
                        .collect();

                    // Only accounts with the director role are linkable.
                    let director_accounts: Vec<_> = accounts
                        .iter()
                        .filter(|a| a.role == Role::Director)
                        .cloned()
                        .collect();

                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"No. Trabajador"</th>
                                    <th>"Nombre Completo"</th>
                                    <th>"Cargo"</th>
                                    <th>"Departamento"</th>
                                    <th>"Cuenta de Acceso"</th>
                                    <Show when=move || admin fallback=|| ()>
                                        <th>"Acciones"</th>
                                    </Show>
                                </tr>
                            </thead>
                            <tbody>
                                {if rows.is_empty() {
                                    let message = if admin {
                                        "No hay directores registrados"
                                    } else {
                                        "No hay directores visibles"
                                    };
                                    view! {
                                        <tr>
                                            <td class="empty" colspan="6">{message}</td>
                                        </tr>
                                    }
                                        .into_view()
                                } else {
                                    rows.into_iter()
                                        .map(|director| {
                                            let row = director.clone();
                                            let department_name = director
                                                .department
                                                .as_ref()
                                                .map(|d| d.name.clone());
                                            let account_email = director
                                                .account
                                                .as_ref()
                                                .map(|a| a.email.clone());
                                            view! {
                                                <tr>
                                                    <td>{director.worker_id.to_string()}</td>
                                                    <td>{director.full_name()}</td>
                                                    <td>{director.title.clone()}</td>
                                                    <td>
                                                        {match department_name {
                                                            Some(name) => name.into_view(),
                                                            None => {
                                                                view! { <span class="muted">"Sin Depto"</span> }
                                                                    .into_view()
                                                            }
                                                        }}
                                                    </td>
                                                    <td>
                                                        {match account_email {
                                                            Some(email) => email.into_view(),
                                                            None => {
                                                                view! { <span class="muted">"Sin asignar"</span> }
                                                                    .into_view()
                                                            }
                                                        }}
                                                    </td>
                                                    <Show when=move || admin fallback=|| ()>
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
                                                    </Show>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>

                        <Show when=move || dialog_open.get() fallback=|| ()>
                            {
                                let departments = departments.clone();
                                let director_accounts = director_accounts.clone();
                                move || {
                                    let departments = departments.clone();
                                    let director_accounts = director_accounts.clone();
                                    view! {
                                        <div class="dialog">
                                            <h2>
                                                {move || {
                                                    if editing.get().is_some() {
                                                        "Editar Director"
                                                    } else {
                                                        "Nuevo Director"
                                                    }
                                                }}
                                            </h2>
                                            <label>"Nombre(s)"</label>
                                            <input
                                                prop:value=move || f_first.get()
                                                on:input=move |ev| f_first.set(event_target_value(&ev))
                                            />
                                            <label>"Ap. Paterno"</label>
                                            <input
                                                prop:value=move || f_paternal.get()
                                                on:input=move |ev| f_paternal.set(event_target_value(&ev))
                                            />
                                            <label>"Ap. Materno"</label>
                                            <input
                                                prop:value=move || f_maternal.get()
                                                on:input=move |ev| f_maternal.set(event_target_value(&ev))
                                            />
                                            <label>"Escuela"</label>
                                            <input
                                                prop:value=move || f_school.get()
                                                on:input=move |ev| f_school.set(event_target_value(&ev))
                                            />
                                            <label>"Cargo"</label>
                                            <input
                                                prop:value=move || f_title.get()
                                                on:input=move |ev| f_title.set(event_target_value(&ev))
                                            />
                                            <label>"Teléfono"</label>
                                            <input
                                                prop:value=move || f_phone.get()
                                                on:input=move |ev| f_phone.set(event_target_value(&ev))
                                            />
                                            <label>"Departamento"</label>
                                            <select
                                                prop:value=move || f_department.get()
                                                on:change=move |ev| {
                                                    f_department.set(event_target_value(&ev))
                                                }
                                            >
                                                <option value="">"Selecciona..."</option>
                                                {departments
                                                    .iter()
                                                    .map(|d| {
                                                        view! {
                                                            <option value=d.id.to_string()>{d.name.clone()}</option>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </select>
                                            <label>"Cuenta de Usuario"</label>
                                            <select
                                                prop:value=move || f_account.get()
                                                on:change=move |ev| f_account.set(event_target_value(&ev))
                                            >
                                                <option value="">"Vincular email"</option>
                                                {director_accounts
                                                    .iter()
                                                    .map(|a| {
                                                        view! {
                                                            <option value=a
                                                                .id
                                                                .to_string()>{a.email.clone()}</option>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </select>
                                            <footer>
                                                <button on:click=move |_| dialog_open.set(false)>
                                                    "Cancelar"
                                                </button>
                                                <button class="primary" on:click=on_save>
                                                    "Guardar"
                                                </button>
                                            </footer>
                                        </div>
                                    }
                                }
                            }
                        </Show>
                    }
                        .into_view()
                }
            }}

            <Show when=move || pending_delete.get().is_some() fallback=|| ()>
                <div class="dialog">
                    <h2>"¿Eliminar director?"</h2>
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
