//! Students screen.
//!
//! Fetches students plus the accounts and protocols the policy evaluator
//! needs, narrows through the visibility rules, and gates every mutating
//! control on catalog permission (admin-only).

use leptos::*;
use protocolos_auth::policy;
use protocolos_core::{BoletaId, Student, StudentPayload, UserId};

use crate::api::{api_client, report_failure};
use crate::notify::use_notifier;
use crate::session::use_session;

#[component]
pub fn StudentsPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();

    let reload = create_rw_signal(0u32);
    let data = create_resource(
        move || reload.get(),
        move |_| async move {
            let client = api_client(session);
            match futures::try_join!(
                client.list_students(),
                client.list_accounts(),
                client.list_protocols(),
            ) {
                Ok(value) => Some(value),
                Err(err) => {
                    report_failure(notifier, &err, "Error al conectar con el servidor");
                    None
                }
            }
        },
    );

    let search = create_rw_signal(String::new());
    let dialog_open = create_rw_signal(false);
    let editing = create_rw_signal(None::<BoletaId>);
    let pending_delete = create_rw_signal(None::<Student>);

    let f_boleta = create_rw_signal(String::new());
    let f_first = create_rw_signal(String::new());
    let f_paternal = create_rw_signal(String::new());
    let f_maternal = create_rw_signal(String::new());
    let f_program = create_rw_signal(String::new());
    let f_semester = create_rw_signal(String::new());
    let f_phone = create_rw_signal(String::new());
    let f_account = create_rw_signal(String::new());

    let open_create = move |_| {
        editing.set(None);
        for field in [
            f_boleta, f_first, f_paternal, f_maternal, f_program, f_semester, f_phone, f_account,
        ] {
            field.set(String::new());
        }
        dialog_open.set(true);
    };

    let open_edit = move |student: Student| {
        editing.set(Some(student.boleta));
        f_boleta.set(student.boleta.to_string());
        f_first.set(student.first_name.clone());
        f_paternal.set(student.paternal_surname.clone());
        f_maternal.set(student.maternal_surname.clone());
        f_program.set(student.program.clone());
        f_semester.set(student.semester.clone());
        f_phone.set(student.phone.clone());
        f_account.set(
            student
                .account_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
        );
        dialog_open.set(true);
    };

    let on_save = move |_| {
        let Ok(boleta) = f_boleta.get_untracked().parse::<BoletaId>() else {
            notifier.error("La boleta es obligatoria");
            return;
        };
        let Ok(account) = f_account.get_untracked().parse::<UserId>() else {
            notifier.error("Asigna un usuario");
            return;
        };
        let payload = StudentPayload {
            boleta,
            first_name: f_first.get_untracked(),
            paternal_surname: f_paternal.get_untracked(),
            maternal_surname: f_maternal.get_untracked(),
            program: f_program.get_untracked(),
            semester: f_semester.get_untracked(),
            phone: f_phone.get_untracked(),
            account: account.into(),
        };
        let current_edit = editing.get_untracked();

        spawn_local(async move {
            let client = api_client(session);
            let result = match current_edit {
                Some(key) => client.update_student(key, &payload).await,
                None => client.create_student(&payload).await,
            };
            match result {
                Ok(()) => {
                    notifier.success(if current_edit.is_some() {
                        "Alumno actualizado"
                    } else {
                        "Alumno creado"
                    });
                    dialog_open.set(false);
                    reload.update(|n| *n += 1);
                }
                Err(err) => report_failure(notifier, &err, "Error al guardar"),
            }
        });
    };

    let on_confirm_delete = move |_| {
        let Some(student) = pending_delete.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api_client(session).delete_student(student.boleta).await {
                Ok(()) => {
                    notifier.success("Alumno eliminado");
                    pending_delete.set(None);
                    reload.update(|n| *n += 1);
                }
                Err(err) => report_failure(notifier, &err, "No se pudo eliminar"),
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
                <h1>"Gestión de Alumnos"</h1>
                <Show when=can_manage fallback=|| ()>
                    <button class="primary" on:click=open_create>
                        "Nuevo Alumno"
                    </button>
                </Show>
            </header>

            <input
                class="search"
                placeholder="Buscar por boleta o nombre..."
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />

            {move || match data.get() {
                None => view! { <p class="loading">"Cargando datos..."</p> }.into_view(),
                Some(None) => {
                    view! { <p class="error">"No se pudo cargar la información"</p> }.into_view()
                }
                Some(Some((students, accounts, protocols))) => {
                    let Some(viewer) = session.viewer() else {
                        return ().into_view();
                    };
                    let admin = policy::can_manage_catalog(&viewer);
                    let term = search.get();
                    let rows: Vec<Student> = policy::visible_students(
                            &viewer,
                            &protocols,
                            &students,
                        )
                        .into_iter()
                        .filter(|s| s.matches_search(&term))
                        .cloned()
                        .collect();

                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Boleta"</th>
                                    <th>"Nombre Completo"</th>
                                    <th>"Carrera / Semestre"</th>
                                    <th>"Cuenta de Acceso"</th>
                                    <Show when=move || admin fallback=|| ()>
                                        <th>"Acciones"</th>
                                    </Show>
                                </tr>
                            </thead>
                            <tbody>
                                {if rows.is_empty() {
                                    let message = if admin {
                                        "No hay alumnos registrados"
                                    } else {
                                        "No tienes permisos para ver otros alumnos"
                                    };
                                    view! {
                                        <tr>
                                            <td class="empty" colspan="5">{message}</td>
                                        </tr>
                                    }
                                        .into_view()
                                } else {
                                    rows.into_iter()
                                        .map(|student| {
                                            let row = student.clone();
                                            let account_email = student
                                                .account
                                                .as_ref()
                                                .map(|a| a.email.clone());
                                            view! {
                                                <tr>
                                                    <td>{student.boleta.to_string()}</td>
                                                    <td>{student.full_name()}</td>
                                                    <td>
                                                        {format!(
                                                            "{} — {}° Sem",
                                                            student.program,
                                                            student.semester,
                                                        )}
                                                    </td>
                                                    <td>
                                                        {match account_email {
                                                            Some(email) => email.into_view(),
                                                            None => {
                                                                view! {
                                                                    <span class="muted">"Sin asignar"</span>
                                                                }
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
                                let accounts = accounts.clone();
                                move || {
                                    let accounts = accounts.clone();
                                    view! {
                                        <div class="dialog">
                                            <h2>
                                                {move || {
                                                    if editing.get().is_some() {
                                                        "Editar Alumno"
                                                    } else {
                                                        "Nuevo Alumno"
                                                    }
                                                }}
                                            </h2>
                                            <label>"Número de Boleta (ID)"</label>
                                            <input
                                                prop:value=move || f_boleta.get()
                                                disabled=move || editing.get().is_some()
                                                on:input=move |ev| f_boleta.set(event_target_value(&ev))
                                            />
                                            <label>"Cuenta de Usuario"</label>
                                            <select
                                                prop:value=move || f_account.get()
                                                on:change=move |ev| f_account.set(event_target_value(&ev))
                                            >
                                                <option value="">"Vincular email"</option>
                                                {accounts
                                                    .iter()
                                                    .map(|account| {
                                                        view! {
                                                            <option value=account
                                                                .id
                                                                .to_string()>{account.email.clone()}</option>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </select>
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
                                            <label>"Carrera"</label>
                                            <input
                                                prop:value=move || f_program.get()
                                                on:input=move |ev| f_program.set(event_target_value(&ev))
                                            />
                                            <label>"Semestre"</label>
                                            <input
                                                prop:value=move || f_semester.get()
                                                on:input=move |ev| f_semester.set(event_target_value(&ev))
                                            />
                                            <label>"Teléfono"</label>
                                            <input
                                                prop:value=move || f_phone.get()
                                                on:input=move |ev| f_phone.set(event_target_value(&ev))
                                            />
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
                    <h2>"¿Eliminar alumno?"</h2>
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
