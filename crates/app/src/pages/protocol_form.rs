//! Protocol create/edit form (admin and director roles only, enforced by the
//! route).
//!
//! Submits a full replacement payload; duplicate student slots are rejected
//! before the request leaves the client.

use leptos::*;
use leptos_router::{use_navigate, use_params_map};
use protocolos_core::{
    BoletaId, ProtocolId, ProtocolPayload, ProtocolRequest, ProtocolStatus, StudentRef, WorkerId,
};

use crate::api::{api_client, report_failure};
use crate::notify::use_notifier;
use crate::session::use_session;

const NONE_VALUE: &str = "none";

#[component]
pub fn ProtocolFormPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();
    let navigate = use_navigate();
    let params = use_params_map();

    let protocol_id =
        move || params.with(|p| p.get("id").and_then(|raw| raw.parse::<ProtocolId>().ok()));
    let is_editing = move || protocol_id().is_some();

    let catalogs = create_resource(
        || (),
        move |_| async move {
            let client = api_client(session);
            match futures::try_join!(client.list_students(), client.list_directors()) {
                Ok(value) => Some(value),
                Err(err) => {
                    report_failure(notifier, &err, "Error al cargar catálogos");
                    None
                }
            }
        },
    );

    let f_title = create_rw_signal(String::new());
    let f_description = create_rw_signal(String::new());
    let f_objectives = create_rw_signal(String::new());
    let f_profile = create_rw_signal(String::new());
    let f_status = create_rw_signal(ProtocolStatus::Pending.as_wire().to_string());
    let f_slots = [
        create_rw_signal(NONE_VALUE.to_string()),
        create_rw_signal(NONE_VALUE.to_string()),
        create_rw_signal(NONE_VALUE.to_string()),
        create_rw_signal(NONE_VALUE.to_string()),
    ];
    let f_director1 = create_rw_signal(NONE_VALUE.to_string());
    let f_director2 = create_rw_signal(NONE_VALUE.to_string());

    // Prefill when editing an existing protocol.
    let existing = create_resource(
        move || protocol_id(),
        move |id| async move {
            let id = id?;
            let client = api_client(session);
            match futures::try_join!(client.protocol(id), client.assignments_for_protocol(id)) {
                Ok(value) => Some(value),
                Err(err) => {
                    report_failure(notifier, &err, "Error al recuperar datos del protocolo");
                    None
                }
            }
        },
    );

    create_effect(move |_| {
        if let Some(Some((protocol, assignments))) = existing.get() {
            f_title.set(protocol.title.clone());
            f_description.set(protocol.description.clone());
            f_objectives.set(protocol.objectives.clone());
            f_profile.set(protocol.required_profile.clone());
            f_status.set(protocol.status.as_wire().to_string());
            let slots = [
                &protocol.student1,
                &protocol.student2,
                &protocol.student3,
                &protocol.student4,
            ];
            for (signal, slot) in f_slots.iter().zip(slots) {
                signal.set(
                    slot.as_ref()
                        .map(|s| s.boleta.to_string())
                        .unwrap_or_else(|| NONE_VALUE.to_string()),
                );
            }
            f_director1.set(
                assignments
                    .first()
                    .map(|a| a.director.worker_id.to_string())
                    .unwrap_or_else(|| NONE_VALUE.to_string()),
            );
            f_director2.set(
                assignments
                    .get(1)
                    .map(|a| a.director.worker_id.to_string())
                    .unwrap_or_else(|| NONE_VALUE.to_string()),
            );
        }
    });

    let nav_submit = navigate.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let slot = |signal: RwSignal<String>| -> Option<StudentRef> {
            let value = signal.get_untracked();
            if value == NONE_VALUE {
                return None;
            }
            value.parse::<BoletaId>().ok().map(StudentRef::from)
        };

        let director = |signal: RwSignal<String>| -> Option<WorkerId> {
            let value = signal.get_untracked();
            if value == NONE_VALUE {
                return None;
            }
            value.parse::<WorkerId>().ok()
        };

        let mut director_ids = Vec::new();
        if let Some(first) = director(f_director1) {
            director_ids.push(first);
        }
        if let Some(second) = director(f_director2) {
            if !director_ids.contains(&second) {
                director_ids.push(second);
            }
        }

        let status = ProtocolStatus::from_wire(&f_status.get_untracked())
            .unwrap_or(ProtocolStatus::Pending);

        let editing_id = protocol_id();
        let request = ProtocolRequest {
            protocol: ProtocolPayload {
                id: editing_id,
                title: f_title.get_untracked(),
                description: f_description.get_untracked(),
                objectives: f_objectives.get_untracked(),
                required_profile: f_profile.get_untracked(),
                status,
                student1: slot(f_slots[0]),
                student2: slot(f_slots[1]),
                student3: slot(f_slots[2]),
                student4: slot(f_slots[3]),
            },
            director_ids,
        };

        if let Err(err) = request.validate() {
            notifier.error(err.to_string());
            return;
        }

        let navigate = nav_submit.clone();
        spawn_local(async move {
            let client = api_client(session);
            let result = match editing_id {
                Some(id) => client.update_protocol(id, &request).await,
                None => client.create_protocol(&request).await,
            };
            match result {
                Ok(()) => {
                    notifier.success(if editing_id.is_some() {
                        "Protocolo actualizado correctamente"
                    } else {
                        "Protocolo creado con éxito"
                    });
                    navigate("/protocolos", Default::default());
                }
                Err(err) => report_failure(notifier, &err, "Error al guardar el protocolo"),
            }
        });
    };

    view! {
        <div class="page">
            <header class="page-header">
                <h1>
                    {move || {
                        if is_editing() { "Editar Protocolo" } else { "Nuevo Protocolo" }
                    }}
                </h1>
            </header>

            <form class="protocol-form" on:submit=on_submit>
                <label>"Título"</label>
                <input
                    prop:value=move || f_title.get()
                    on:input=move |ev| f_title.set(event_target_value(&ev))
                />
                <label>"Descripción"</label>
                <textarea
                    prop:value=move || f_description.get()
                    on:input=move |ev| f_description.set(event_target_value(&ev))
                ></textarea>
                <label>"Objetivos"</label>
                <textarea
                    prop:value=move || f_objectives.get()
                    on:input=move |ev| f_objectives.set(event_target_value(&ev))
                ></textarea>
                <label>"Perfil Requerido"</label>
                <input
                    prop:value=move || f_profile.get()
                    on:input=move |ev| f_profile.set(event_target_value(&ev))
                />
                <label>"Estado"</label>
                <select
                    prop:value=move || f_status.get()
                    on:change=move |ev| f_status.set(event_target_value(&ev))
                >
                    {ProtocolStatus::ALL
                        .iter()
                        .map(|status| {
                            view! { <option value=status.as_wire()>{status.as_wire()}</option> }
                        })
                        .collect_view()}
                </select>

                {move || match catalogs.get() {
                    None => view! { <p class="loading">"Cargando catálogos..."</p> }.into_view(),
                    Some(None) => {
                        view! { <p class="error">"No se pudieron cargar los catálogos"</p> }
                            .into_view()
                    }
                    Some(Some((students, directors))) => {
                        view! {
                            <fieldset>
                                <legend>"Alumnos (hasta 4)"</legend>
                                {f_slots
                                    .iter()
                                    .enumerate()
                                    .map(|(index, signal)| {
                                        let signal = *signal;
                                        view! {
                                            <label>{format!("Alumno {}", index + 1)}</label>
                                            <select
                                                prop:value=move || signal.get()
                                                on:change=move |ev| signal.set(event_target_value(&ev))
                                            >
                                                <option value=NONE_VALUE>"Sin asignar"</option>
                                                {students
                                                    .iter()
                                                    .map(|s| {
                                                        view! {
                                                            <option value=s.boleta.to_string()>
                                                                {format!("{} — {}", s.boleta, s.full_name())}
                                                            </option>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </select>
                                        }
                                    })
                                    .collect_view()}
                            </fieldset>
                            <fieldset>
                                <legend>"Directores"</legend>
                                {[("Director 1", f_director1), ("Director 2", f_director2)]
                                    .into_iter()
                                    .map(|(label, signal)| {
                                        view! {
                                            <label>{label}</label>
                                            <select
                                                prop:value=move || signal.get()
                                                on:change=move |ev| signal.set(event_target_value(&ev))
                                            >
                                                <option value=NONE_VALUE>"Sin asignar"</option>
                                                {directors
                                                    .iter()
                                                    .map(|d| {
                                                        view! {
                                                            <option value=d.worker_id.to_string()>
                                                                {d.full_name()}
                                                            </option>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </select>
                                        }
                                    })
                                    .collect_view()}
                            </fieldset>
                        }
                            .into_view()
                    }
                }}

                <footer>
                    <button
                        type="button"
                        on:click={
                            let navigate = navigate.clone();
                            move |_| navigate("/protocolos", Default::default())
                        }
                    >
                        "Cancelar"
                    </button>
                    <button type="submit" class="primary">"Guardar"</button>
                </footer>
            </form>
        </div>
    }
}
