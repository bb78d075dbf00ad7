//! Dashboard: visible-set counts plus the caller's own profile card.

use leptos::*;
use leptos_router::use_navigate;
use serde::{Deserialize, Serialize};
use protocolos_auth::{policy, Viewer};
use protocolos_client::ApiResult;
use protocolos_core::{Director, Role, Student};

use crate::api::{api_client, report_failure};
use crate::notify::use_notifier;
use crate::session::use_session;

/// Whose data the greeting card shows.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
enum Profile {
    Student(Student),
    Director(Director),
    Admin,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
struct DashboardData {
    protocols: usize,
    students: usize,
    directors: usize,
    departments: usize,
    profile: Profile,
}

async fn load(viewer: Viewer, client: protocolos_client::ApiClient) -> ApiResult<DashboardData> {
    let (protocols, students, directors, departments) = futures::try_join!(
        client.list_protocols(),
        client.list_students(),
        client.list_directors(),
        client.list_departments(),
    )?;

    let own_director = policy::director_profile(&viewer, &directors).cloned();

    let profile = match viewer.role {
        Role::Admin => Profile::Admin,
        Role::Student => Profile::Student(client.student_by_account(viewer.user_id).await?),
        Role::Director => Profile::Director(client.director_by_account(viewer.user_id).await?),
    };

    Ok(DashboardData {
        protocols: policy::member_protocols(&viewer, &protocols).len(),
        students: policy::visible_students(&viewer, &protocols, &students).len(),
        directors: policy::visible_directors(&viewer, &protocols, &directors).len(),
        departments: policy::visible_departments(&viewer, own_director.as_ref(), &departments)
            .len(),
        profile,
    })
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();
    let navigate = use_navigate();

    let data = create_resource(
        || (),
        move |_| async move {
            let current = session.get_untracked()?;
            let viewer = Viewer::from(&current);
            match load(viewer, api_client(session)).await {
                Ok(data) => Some(data),
                Err(err) => {
                    report_failure(notifier, &err, "Error al cargar el tablero");
                    None
                }
            }
        },
    );

    let role = move || session.get().map(|s| s.role);

    view! {
        <div class="page dashboard">
            {move || match data.get() {
                None => view! { <p class="loading">"Cargando..."</p> }.into_view(),
                Some(None) => {
                    view! { <p class="error">"No se pudo cargar la información"</p> }.into_view()
                }
                Some(Some(data)) => {
                    let navigate = navigate.clone();
                    let is_director = role() == Some(Role::Director);
                    let is_student = role() == Some(Role::Student);

                    let mut cards = vec![
                        (
                            if is_director { "Mis Protocolos" } else { "Protocolos" },
                            data.protocols,
                            "/protocolos",
                        ),
                        (
                            if is_director { "Mis Alumnos" } else { "Alumnos" },
                            data.students,
                            "/alumnos",
                        ),
                        (
                            if is_director { "Colegas" } else { "Directores" },
                            data.directors,
                            "/directores",
                        ),
                    ];
                    if !is_student {
                        cards.push((
                            if is_director { "Mi Departamento" } else { "Departamentos" },
                            data.departments,
                            "/departamentos",
                        ));
                    }

                    view! {
                        <ProfileCard profile=data.profile.clone()/>
                        <div class="stat-grid">
                            {cards
                                .into_iter()
                                .map(|(title, value, path)| {
                                    let navigate = navigate.clone();
                                    view! {
                                        <button
                                            class="stat-card"
                                            on:click=move |_| navigate(path, Default::default())
                                        >
                                            <span class="stat-title">{title}</span>
                                            <span class="stat-value">{value}</span>
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                        .into_view()
                }
            }}
        </div>
    }
}

#[component]
fn ProfileCard(profile: Profile) -> impl IntoView {
    let session = use_session();
    let email = move || session.get().map(|s| s.email).unwrap_or_default();

    let (name, detail, badge) = match &profile {
        Profile::Admin => (
            "Administrador".to_string(),
            "Gestión Total".to_string(),
            "ADM-ROOT".to_string(),
        ),
        Profile::Student(student) => (
            student.first_name.clone(),
            format!("Alumno • {}", student.program),
            format!("Boleta: {}", student.boleta),
        ),
        Profile::Director(director) => (
            director.first_name.clone(),
            format!("Director • {}", director.title),
            format!("Trabajador: {}", director.worker_id),
        ),
    };

    view! {
        <div class="profile-card">
            <h1>"Hola, " {name}</h1>
            <p class="profile-detail">{detail}</p>
            <p class="profile-badge">{badge}</p>
            <p class="profile-email">{email}</p>
        </div>
    }
}
