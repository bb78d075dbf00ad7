//! Departments screen (admin and director roles only, enforced by the route).
//!
//! Directors are narrowed to the single department their own profile
//! references; with none assigned they get an empty list and a warning, not
//! an error.

use leptos::*;
use protocolos_auth::{policy, Viewer};
use protocolos_core::{Department, DepartmentId, DepartmentPayload, Role};

use crate::api::{api_client, report_failure};
use crate::notify::use_notifier;
use crate::session::use_session;

#[component]
pub fn DepartmentsPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();

    let reload = create_rw_signal(0u32);
    let data = create_resource(
        move || reload.get(),
        move |_| async move {
            let current = session.get_untracked()?;
            let viewer = Viewer::from(&current);
            let client = api_client(session);

            let departments = match client.list_departments().await {
                Ok(departments) => departments,
                Err(err) => {
                    report_failure(notifier, &err, "Error al cargar departamentos");
                    return None;
                }
            };

            let own_profile = if viewer.role == Role::Director {
                match client.director_by_account(viewer.user_id).await {
                    Ok(profile) => Some(profile),
                    Err(err) if err.is_unauthorized() => {
                        report_failure(notifier, &err, "Error al cargar departamentos");
                        return None;
                    }
                    // A missing profile narrows to nothing, same as no
                    // department reference.
                    Err(_) => None,
                }
            } else {
                None
            };

            let visible: Vec<Department> =
                policy::visible_departments(&viewer, own_profile.as_ref(), &departments)
                    .into_iter()
                    .cloned()
                    .collect();

            if viewer.role == Role::Director && visible.is_empty() {
                notifier.warning("No tienes un departamento asignado.");
            }

            Some(visible)
        },
    );

    let search = create_rw_signal(String::new());
    let dialog_open = create_rw_signal(false);
    let editing = create_rw_signal(None::<DepartmentId>);
    let pending_delete = create_rw_signal(None::<Department>);

    let f_name = create_rw_signal(String::new());
    let f_code = create_rw_signal(String::new());
    let f_head = create_rw_signal(String::new());

    let open_create = move |_| {
        editing.set(None);
        f_name.set(String::new());
        f_code.set(String::new());
        f_head.set(String::new());
        dialog_open.set(true);
    };

    let open_edit = move |department: Department| {
        editing.set(Some(department.id));
        f_name.set(department.name.clone());
        f_code.set(department.code.clone());
        f_head.set(department.head_name.clone());
        dialog_open.set(true);
    };

    let on_save = move |_| {
        let payload = DepartmentPayload {
            name: f_name.get_untracked(),
            code: f_code.get_untracked(),
            head_name: f_head.get_untracked(),
        };
        if payload.name.trim().is_empty() {
            notifier.error("El nombre es obligatorio");
            return;
        }
        let current_edit = editing.get_untracked();

        spawn_local(async move {
            let client = api_client(session);
            let result = match current_edit {
                Some(id) => client.update_department(id, &payload).await,
                None => client.create_department(&payload).await,
            };
            match result {
                Ok(()) => {
                    notifier.success(if current_edit.is_some() {
                        "Departamento actualizado"
                    } else {
                        "Departamento creado"
                    });
                    dialog_open.set(false);
                    reload.update(|n| *n += 1);
                }
                Err(err) => report_failure(notifier, &err, "Error al guardar"),
            }
        });
    };

    let on_confirm_delete = move |_| {
        let Some(department) = pending_delete.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api_client(session).delete_department(department.id).await {
                Ok(()) => {
                    notifier.success("Departamento eliminado");
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
    let is_director = move || session.get().is_some_and(|s| s.role == Role::Director);

    view! {
        <div class="page">
            <header class="page-header">
                <h1>"Departamentos"</h1>
                <Show when=can_manage fallback=|| ()>
                    <button class="primary" on:click=open_create>
                        "Nuevo Departamento"
                    </button>
                </Show>
            </header>

            <input
                class="search"
                placeholder="Buscar por nombre, código o responsable..."
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />

            {move || match data.get() {
                None => view! { <p class="loading">"Cargando..."</p> }.into_view(),
                Some(None) => {
                    view! { <p class="error">"No se pudo cargar la información"</p> }.into_view()
                }
                Some(Some(departments)) => {
                    let admin = can_manage();
                    let term = search.get();
                    let rows: Vec<Department> = departments
                        .iter()
                        .filter(|d| d.matches_search(&term))
                        .cloned()
                        .collect();

                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Nombre"</th>
                                    <th>"Código"</th>
                                    <th>"Responsable"</th>
                                    <Show when=move || admin fallback=|| ()>
                                        <th>"Acciones"</th>
                                    </Show>
                                </tr>
                            </thead>
                            <tbody>
                                {if rows.is_empty() {
                                    let message = if is_director() {
                                        "No tienes un departamento asignado"
                                    } else {
                                        "No se encontraron departamentos"
                                    };
                                    view! {
                                        <tr>
                                            <td class="empty" colspan="4">{message}</td>
                                        </tr>
                                    }
                                        .into_view()
                                } else {
                                    rows.into_iter()
                                        .map(|department| {
                                            let row = department.clone();
                                            view! {
                                                <tr>
                                                    <td>{department.name.clone()}</td>
                                                    <td>{department.code.clone()}</td>
                                                    <td>{department.head_name.clone()}</td>
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
                    }
                        .into_view()
                }
            }}

            <Show when=move || dialog_open.get() fallback=|| ()>
                <div class="dialog">
                    <h2>
                        {move || {
                            if editing.get().is_some() {
                                "Editar Departamento"
                            } else {
                                "Nuevo Departamento"
                            }
                        }}
                    </h2>
                    <label>"Nombre del Departamento"</label>
                    <input
                        prop:value=move || f_name.get()
                        on:input=move |ev| f_name.set(event_target_value(&ev))
                    />
                    <label>"Código"</label>
                    <input
                        prop:value=move || f_code.get()
                        on:input=move |ev| f_code.set(event_target_value(&ev))
                    />
                    <label>"Responsable"</label>
                    <input
                        prop:value=move || f_head.get()
                        on:input=move |ev| f_head.set(event_target_value(&ev))
                    />
                    <footer>
                        <button on:click=move |_| dialog_open.set(false)>"Cancelar"</button>
                        <button class="primary" on:click=on_save>"Guardar"</button>
                    </footer>
                </div>
            </Show>

            <Show when=move || pending_delete.get().is_some() fallback=|| ()>
                <div class="dialog">
                    <h2>"¿Eliminar departamento?"</h2>
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
