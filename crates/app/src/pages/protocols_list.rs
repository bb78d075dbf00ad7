//! Protocols list.
//!
//! Non-admins see exactly the protocols they belong to; each card's edit and
//! delete controls are gated per-protocol by the mutation predicate.

use leptos::*;
use leptos_router::use_navigate;
use protocolos_auth::policy;
use protocolos_core::{Protocol, ProtocolStatus};

use crate::api::{api_client, report_failure};
use crate::notify::use_notifier;
use crate::session::use_session;

#[component]
pub fn ProtocolsListPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();
    let navigate = use_navigate();

    let reload = create_rw_signal(0u32);
    let data = create_resource(
        move || reload.get(),
        move |_| async move {
            match api_client(session).list_protocols().await {
                Ok(protocols) => Some(protocols),
                Err(err) => {
                    report_failure(notifier, &err, "Error al cargar protocolos");
                    None
                }
            }
        },
    );

    let search = create_rw_signal(String::new());
    // "todos" or a wire status string.
    let status_filter = create_rw_signal("todos".to_string());
    let pending_delete = create_rw_signal(None::<Protocol>);

    let on_confirm_delete = move |_| {
        let Some(protocol) = pending_delete.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api_client(session).delete_protocol(protocol.id).await {
                Ok(()) => {
                    notifier.success("Protocolo eliminado");
                    pending_delete.set(None);
                    reload.update(|n| *n += 1);
                }
                Err(err) => report_failure(notifier, &err, "Error al eliminar"),
            }
        });
    };

    let can_create = move || {
        session
            .viewer()
            .is_some_and(|v| policy::can_create_protocols(&v))
    };

    let nav_new = navigate.clone();

    view! {
        <div class="page">
            <header class="page-header">
                <h1>"Gestión de Protocolos"</h1>
                <Show when=can_create fallback=|| ()>
                    <button
                        class="primary"
                        on:click={
                            let nav_new = nav_new.clone();
                            move |_| nav_new("/protocolos/nuevo", Default::default())
                        }
                    >
                        "Nuevo Protocolo"
                    </button>
                </Show>
            </header>

            <div class="toolbar">
                <input
                    class="search"
                    placeholder="Buscar por título o descripción..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select
                    prop:value=move || status_filter.get()
                    on:change=move |ev| status_filter.set(event_target_value(&ev))
                >
                    <option value="todos">"Todos los estados"</option>
                    {ProtocolStatus::ALL
                        .iter()
                        .map(|status| {
                            view! { <option value=status.as_wire()>{status.as_wire()}</option> }
                        })
                        .collect_view()}
                </select>
            </div>

            {
                let navigate = navigate.clone();
                move || match data.get() {
                    None => view! { <p class="loading">"Cargando..."</p> }.into_view(),
                    Some(None) => {
                        view! { <p class="error">"No se pudo cargar la información"</p> }
                            .into_view()
                    }
                    Some(Some(protocols)) => {
                        let Some(viewer) = session.viewer() else {
                            return ().into_view();
                        };
                        let term = search.get();
                        let filter = status_filter.get();
                        let cards: Vec<Protocol> = policy::member_protocols(&viewer, &protocols)
                            .into_iter()
                            .filter(|p| p.matches_search(&term))
                            .filter(|p| filter == "todos" || p.status.as_wire() == filter)
                            .cloned()
                            .collect();

                        if cards.is_empty() {
                            return view! {
                                <p class="empty">"No se encontraron resultados"</p>
                            }
                                .into_view();
                        }

                        cards
                            .into_iter()
                            .map(|protocol| {
                                let can_modify = policy::can_modify_protocol(&viewer, &protocol);
                                let is_student = !policy::can_create_protocols(&viewer);
                                let detail_path = format!("/protocolos/{}", protocol.id);
                                let edit_path = format!("/protocolos/editar/{}", protocol.id);
                                let students: Vec<String> = protocol
                                    .students()
                                    .map(|s| s.full_name())
                                    .collect();
                                let directors: Vec<String> = protocol
                                    .directors()
                                    .map(|d| d.full_name())
                                    .collect();
                                let nav_detail = navigate.clone();
                                let nav_edit = navigate.clone();
                                let row = protocol.clone();
                                view! {
                                    <article class="protocol-card">
                                        <header>
                                            <h2>{protocol.title.clone()}</h2>
                                            <span class="badge">{protocol.status.as_wire()}</span>
                                        </header>
                                        <p>{protocol.description.clone()}</p>
                                        <div class="members">
                                            <div>
                                                <h3>"Alumnos"</h3>
                                                {if students.is_empty() {
                                                    view! { <p class="muted">"Sin alumnos"</p> }.into_view()
                                                } else {
                                                    students
                                                        .into_iter()
                                                        .map(|name| view! { <p>{name}</p> })
                                                        .collect_view()
                                                }}
                                            </div>
                                            <div>
                                                <h3>"Directores"</h3>
                                                {if directors.is_empty() {
                                                    view! { <p class="muted">"Sin asignar"</p> }.into_view()
                                                } else {
                                                    directors
                                                        .into_iter()
                                                        .map(|name| view! { <p>{name}</p> })
                                                        .collect_view()
                                                }}
                                            </div>
                                        </div>
                                        <footer>
                                            <span class="muted">
                                                {protocol.registered_at.format("%d/%m/%Y").to_string()}
                                            </span>
                                            <div class="actions">
                                                <button on:click=move |_| {
                                                    nav_detail(&detail_path, Default::default())
                                                }>"Detalle"</button>
                                                {if can_modify {
                                                    view! {
                                                        <button on:click=move |_| {
                                                            nav_edit(&edit_path, Default::default())
                                                        }>"Editar"</button>
                                                        <button
                                                            class="danger"
                                                            on:click=move |_| pending_delete.set(Some(row.clone()))
                                                        >
                                                            "Eliminar"
                                                        </button>
                                                    }
                                                        .into_view()
                                                } else if !is_student {
                                                    view! {
                                                        <span class="badge muted" title="Lectura">
                                                            "Solo lectura"
                                                        </span>
                                                    }
                                                        .into_view()
                                                } else {
                                                    ().into_view()
                                                }}
                                            </div>
                                        </footer>
                                    </article>
                                }
                            })
                            .collect_view()
                    }
                }
            }

            <Show when=move || pending_delete.get().is_some() fallback=|| ()>
                <div class="dialog">
                    <h2>"Eliminar Protocolo"</h2>
                    <p>
                        {move || {
                            pending_delete
                                .get()
                                .map(|p| format!("¿Estás seguro de eliminar \"{}\"?", p.title))
                                .unwrap_or_default()
                        }}
                    </p>
                    <footer>
                        <button on:click=move |_| pending_delete.set(None)>"Cancelar"</button>
                        <button class="danger" on:click=on_confirm_delete>"Confirmar"</button>
                    </footer>
                </div>
            </Show>
        </div>
    }
}
