//! Protocol detail and workflow screen.
//!
//! Two distinct gates live here: the mutation predicate controls the edit
//! button and the director-assignment workflow; the broader reporting
//! predicate controls the PDF/email panel (student members qualify for the
//! latter, never for the former).

use leptos::*;
use leptos_router::{use_navigate, use_params_map};
use protocolos_auth::policy;
use protocolos_core::{AssignmentId, ProtocolId, WorkerId};

use crate::api::{api_client, report_failure};
use crate::download;
use crate::notify::use_notifier;
use crate::session::use_session;

#[component]
pub fn ProtocolDetailPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();
    let navigate = use_navigate();
    let params = use_params_map();

    let protocol_id =
        move || params.with(|p| p.get("id").and_then(|raw| raw.parse::<ProtocolId>().ok()));

    let reload = create_rw_signal(0u32);
    let data = create_resource(
        move || (protocol_id(), reload.get()),
        move |(id, _)| async move {
            let id = id?;
            let client = api_client(session);
            match futures::try_join!(
                client.protocol(id),
                client.list_directors(),
                client.assignments_for_protocol(id),
            ) {
                Ok((mut protocol, directors, assignments)) => {
                    // The join endpoint is the authority on assignments; the
                    // embedded list may lag behind it.
                    protocol.assignments = assignments;
                    Some((protocol, directors))
                }
                Err(err) => {
                    report_failure(notifier, &err, "Error al cargar los datos");
                    None
                }
            }
        },
    );

    let assign_dialog_open = create_rw_signal(false);
    let selected_director = create_rw_signal(String::new());
    let pending_unassign = create_rw_signal(None::<AssignmentId>);
    let email_dialog_open = create_rw_signal(false);
    let email_input = create_rw_signal(String::new());

    let on_assign = move |_| {
        let Some(id) = protocol_id() else {
            return;
        };
        let Ok(worker) = selected_director.get_untracked().parse::<WorkerId>() else {
            notifier.error("Selecciona un director");
            return;
        };
        spawn_local(async move {
            match api_client(session).assign_director(id, worker).await {
                Ok(()) => {
                    notifier.success("Asignado correctamente");
                    assign_dialog_open.set(false);
                    selected_director.set(String::new());
                    reload.update(|n| *n += 1);
                }
                Err(err) => report_failure(notifier, &err, "No se pudo asignar"),
            }
        });
    };

    let on_confirm_unassign = move |_| {
        let Some(assignment) = pending_unassign.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api_client(session).unassign_director(assignment).await {
                Ok(()) => {
                    notifier.success("Director eliminado del protocolo");
                    pending_unassign.set(None);
                    reload.update(|n| *n += 1);
                }
                Err(err) => report_failure(notifier, &err, "Error al eliminar"),
            }
        });
    };

    let on_download = move |_| {
        let Some(id) = protocol_id() else {
            return;
        };
        spawn_local(async move {
            match api_client(session).download_protocol_pdf(id).await {
                Ok(bytes) => {
                    download::save_pdf(&format!("Protocolo_{id}.pdf"), &bytes);
                    notifier.success("PDF generado");
                }
                Err(err) => report_failure(notifier, &err, "Error al generar el PDF"),
            }
        });
    };

    view! {
        <div class="page">
            <button
                class="back"
                on:click={
                    let navigate = navigate.clone();
                    move |_| navigate("/protocolos", Default::default())
                }
            >
                "Volver a protocolos"
            </button>

            {
                let navigate = navigate.clone();
                move || match data.get() {
                    None => view! { <p class="loading">"Cargando..."</p> }.into_view(),
                    Some(None) => {
                        view! { <p class="error">"No se pudo cargar la información"</p> }
                            .into_view()
                    }
                    Some(Some((protocol, directors))) => {
                        let Some(viewer) = session.viewer() else {
                            return ().into_view();
                        };
                        let can_modify = policy::can_modify_protocol(&viewer, &protocol);
                        let can_report = policy::can_report_protocol(&viewer, &protocol);

                        let available: Vec<_> = directors
                            .iter()
                            .filter(|d| !protocol.has_director(d.worker_id))
                            .cloned()
                            .collect();
                        let none_available = available.is_empty();

                        let students: Vec<_> = protocol.students().cloned().collect();
                        let assignments = protocol.assignments.clone();
                        let title = protocol.title.clone();
                        let edit_path = format!("/protocolos/editar/{}", protocol.id);
                        let nav_edit = navigate.clone();

                        let on_send_email = {
                            let title = title.clone();
                            move |_| {
                                let recipient = email_input.get_untracked();
                                if recipient.trim().is_empty() {
                                    notifier.error("Correo inválido");
                                    return;
                                }
                                let Some(id) = protocol_id() else {
                                    return;
                                };
                                let email = protocolos_client::ReportEmail {
                                    protocol_id: id,
                                    recipient,
                                    subject: format!("Seguimiento: {title}"),
                                    student_name: "Sistema".to_string(),
                                    proposer_name: "IPN - ESCOM".to_string(),
                                    contact: "admin@ipn.mx".to_string(),
                                };
                                spawn_local(async move {
                                    match api_client(session).send_protocol_report(&email).await {
                                        Ok(()) => {
                                            notifier.success("Enviado");
                                            email_dialog_open.set(false);
                                            email_input.set(String::new());
                                        }
                                        Err(err) => report_failure(notifier, &err, "Error al enviar"),
                                    }
                                });
                            }
                        };

                        view! {
                            <header class="page-header">
                                <div>
                                    <h1>{title.clone()}</h1>
                                    <span class="badge">{protocol.status.as_wire()}</span>
                                </div>
                                {if can_modify {
                                    view! {
                                        <button
                                            class="primary"
                                            on:click=move |_| nav_edit(&edit_path, Default::default())
                                        >
                                            "Editar Información"
                                        </button>
                                    }
                                        .into_view()
                                } else {
                                    view! { <span class="badge muted">"Modo Lectura"</span> }
                                        .into_view()
                                }}
                            </header>

                            <section class="card">
                                <h2>"Información del Proyecto"</h2>
                                <dl>
                                    <dt>"Descripción"</dt>
                                    <dd>{protocol.description.clone()}</dd>
                                    <dt>"Objetivos"</dt>
                                    <dd>{protocol.objectives.clone()}</dd>
                                    <dt>"Perfil Requerido"</dt>
                                    <dd>{protocol.required_profile.clone()}</dd>
                                    <dt>"Fecha de Registro"</dt>
                                    <dd>{protocol.registered_at.format("%d/%m/%Y").to_string()}</dd>
                                </dl>
                            </section>

                            <section class="card">
                                <h2>"Alumnos Participantes"</h2>
                                {if students.is_empty() {
                                    view! { <p class="muted">"No hay alumnos registrados"</p> }
                                        .into_view()
                                } else {
                                    students
                                        .iter()
                                        .map(|student| {
                                            view! {
                                                <div class="member">
                                                    <span>{student.full_name()}</span>
                                                    <span class="muted">
                                                        {format!("Boleta: {}", student.boleta)}
                                                    </span>
                                                </div>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </section>

                            <section class="card">
                                <header class="card-header">
                                    <h2>"Directores"</h2>
                                    <Show when=move || can_modify fallback=|| ()>
                                        <button
                                            disabled=none_available
                                            on:click=move |_| assign_dialog_open.set(true)
                                        >
                                            "Añadir"
                                        </button>
                                    </Show>
                                </header>
                                {if assignments.is_empty() {
                                    view! { <p class="muted">"Sin directores asignados"</p> }
                                        .into_view()
                                } else {
                                    assignments
                                        .iter()
                                        .map(|assignment| {
                                            let assignment_id = assignment.id;
                                            let department = assignment
                                                .director
                                                .department
                                                .as_ref()
                                                .map(|d| d.name.clone())
                                                .unwrap_or_else(|| "Sin Depto".to_string());
                                            view! {
                                                <div class="member">
                                                    <span>{assignment.director.full_name()}</span>
                                                    <span class="muted">{department}</span>
                                                    <Show when=move || can_modify fallback=|| ()>
                                                        <button
                                                            class="danger"
                                                            on:click=move |_| {
                                                                pending_unassign.set(Some(assignment_id))
                                                            }
                                                        >
                                                            "Quitar"
                                                        </button>
                                                    </Show>
                                                </div>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </section>

                            <section class="card reports">
                                <h2>"Reportes"</h2>
                                {if can_report {
                                    view! {
                                        <button on:click=on_download>"Descargar PDF"</button>
                                        <button on:click=move |_| email_dialog_open.set(true)>
                                            "Enviar Correo"
                                        </button>
                                    }
                                        .into_view()
                                } else {
                                    view! {
                                        <p class="muted">
                                            "Solo los miembros del protocolo pueden generar reportes."
                                        </p>
                                    }
                                        .into_view()
                                }}
                            </section>

                            <Show when=move || assign_dialog_open.get() fallback=|| ()>
                                {
                                    let available = available.clone();
                                    move || {
                                        let available = available.clone();
                                        view! {
                                            <div class="dialog">
                                                <h2>"Asignar Nuevo Director"</h2>
                                                <label>"Director disponible"</label>
                                                <select
                                                    prop:value=move || selected_director.get()
                                                    on:change=move |ev| {
                                                        selected_director.set(event_target_value(&ev))
                                                    }
                                                >
                                                    <option value="">"Selecciona..."</option>
                                                    {available
                                                        .iter()
                                                        .map(|d| {
                                                            view! {
                                                                <option value=d
                                                                    .worker_id
                                                                    .to_string()>{d.full_name()}</option>
                                                            }
                                                        })
                                                        .collect_view()}
                                                </select>
                                                <footer>
                                                    <button on:click=move |_| assign_dialog_open.set(false)>
                                                        "Cancelar"
                                                    </button>
                                                    <button class="primary" on:click=on_assign>
                                                        "Asignar"
                                                    </button>
                                                </footer>
                                            </div>
                                        }
                                    }
                                }
                            </Show>

                            <Show when=move || email_dialog_open.get() fallback=|| ()>
                                {
                                    let on_send_email = on_send_email.clone();
                                    move || {
                                        let on_send_email = on_send_email.clone();
                                        view! {
                                            <div class="dialog">
                                                <h2>"Enviar Reporte"</h2>
                                                <p class="muted">
                                                    "Se enviará el PDF al correo especificado."
                                                </p>
                                                <label>"Destinatario"</label>
                                                <input
                                                    type="email"
                                                    placeholder="ejemplo@ipn.mx"
                                                    prop:value=move || email_input.get()
                                                    on:input=move |ev| {
                                                        email_input.set(event_target_value(&ev))
                                                    }
                                                />
                                                <footer>
                                                    <button on:click=move |_| email_dialog_open.set(false)>
                                                        "Cancelar"
                                                    </button>
                                                    <button class="primary" on:click=on_send_email>
                                                        "Enviar"
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
                }
            }

            <Show when=move || pending_unassign.get().is_some() fallback=|| ()>
                <div class="dialog">
                    <h2>"¿Quitar director del protocolo?"</h2>
                    <p>"El director dejará de tener acceso de edición."</p>
                    <footer>
                        <button on:click=move |_| pending_unassign.set(None)>"Cancelar"</button>
                        <button class="danger" on:click=on_confirm_unassign>"Confirmar"</button>
                    </footer>
                </div>
            </Show>
        </div>
    }
}
