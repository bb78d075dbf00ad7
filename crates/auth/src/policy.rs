//! Scoped-visibility and action policy.
//!
//! These rules live in exactly one place; every screen feeds its freshly
//! fetched collections through them instead of keeping a local copy.
//!
//! - No IO
//! - No panics
//! - `Admin` short-circuits to full visibility and full permissions
//!
//! Visibility for non-admins hangs off **membership**: the protocols where
//! the caller occupies a student slot or appears in the director-assignment
//! list, joined through the linked login account. Mutation and reporting are
//! two different predicates that happen to look similar; keep them separate
//! (reporting admits student members, mutation never does).

use std::collections::BTreeSet;

use protocolos_core::{Department, Director, Protocol, Role, Student, UserId};

use crate::session::Session;

/// Identity facts the evaluator needs; a cheap copy of the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: UserId,
    pub role: Role,
}

impl Viewer {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}

impl From<&Session> for Viewer {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user_id,
            role: session.role,
        }
    }
}

/// Protocols the viewer belongs to. Admins get the full list.
pub fn member_protocols<'a>(viewer: &Viewer, protocols: &'a [Protocol]) -> Vec<&'a Protocol> {
    if viewer.role == Role::Admin {
        return protocols.iter().collect();
    }
    protocols
        .iter()
        .filter(|p| p.is_student_member(viewer.user_id) || p.is_director_member(viewer.user_id))
        .collect()
}

/// The viewer's own student profile, if any (join on the linked account).
pub fn student_profile<'a>(viewer: &Viewer, students: &'a [Student]) -> Option<&'a Student> {
    students
        .iter()
        .find(|s| s.account_id() == Some(viewer.user_id))
}

/// The viewer's own director profile, if any.
pub fn director_profile<'a>(viewer: &Viewer, directors: &'a [Director]) -> Option<&'a Director> {
    directors
        .iter()
        .find(|d| d.account_id() == Some(viewer.user_id))
}

/// Students visible to the viewer: the union of student slots across the
/// viewer's protocols, plus the viewer's own profile when the viewer is a
/// student (even with no protocol membership yet).
pub fn visible_students<'a>(
    viewer: &Viewer,
    protocols: &[Protocol],
    students: &'a [Student],
) -> Vec<&'a Student> {
    if viewer.role == Role::Admin {
        return students.iter().collect();
    }

    let mut boletas: BTreeSet<_> = member_protocols(viewer, protocols)
        .iter()
        .flat_map(|p| p.students())
        .map(|s| s.boleta)
        .collect();

    if viewer.role == Role::Student {
        if let Some(own) = student_profile(viewer, students) {
            boletas.insert(own.boleta);
        }
    }

    students.iter().filter(|s| boletas.contains(&s.boleta)).collect()
}

/// Directors visible to the viewer: the union of assigned directors across
/// the viewer's protocols, plus the viewer's own profile when the viewer is a
/// director.
///
/// A director with no protocols and no self-match sees an empty list; that
/// strict need-to-know scan is deliberate.
pub fn visible_directors<'a>(
    viewer: &Viewer,
    protocols: &[Protocol],
    directors: &'a [Director],
) -> Vec<&'a Director> {
    if viewer.role == Role::Admin {
        return directors.iter().collect();
    }

    let mut workers: BTreeSet<_> = member_protocols(viewer, protocols)
        .iter()
        .flat_map(|p| p.directors())
        .map(|d| d.worker_id)
        .collect();

    if viewer.role == Role::Director {
        if let Some(own) = director_profile(viewer, directors) {
            workers.insert(own.worker_id);
        }
    }

    directors
        .iter()
        .filter(|d| workers.contains(&d.worker_id))
        .collect()
}

/// Departments visible to the viewer.
///
/// Directors see exactly the department their own profile references; a
/// director without one gets an empty list (the screen warns, it does not
/// error). Students never see departments.
pub fn visible_departments<'a>(
    viewer: &Viewer,
    own_director: Option<&Director>,
    departments: &'a [Department],
) -> Vec<&'a Department> {
    match viewer.role {
        Role::Admin => departments.iter().collect(),
        Role::Student => Vec::new(),
        Role::Director => match own_director.and_then(|d| d.department_id()) {
            Some(id) => departments.iter().filter(|d| d.id == id).collect(),
            None => Vec::new(),
        },
    }
}

/// Whether the viewer may edit/delete this protocol and manage its director
/// assignments. Directors qualify only on protocols they are assigned to;
/// students never qualify.
pub fn can_modify_protocol(viewer: &Viewer, protocol: &Protocol) -> bool {
    match viewer.role {
        Role::Admin => true,
        Role::Student => false,
        Role::Director => protocol.is_director_member(viewer.user_id),
    }
}

/// Whether the viewer may generate reports (PDF download / email) for this
/// protocol. Strictly broader than mutation: all four student slots qualify,
/// not just assigned directors.
pub fn can_report_protocol(viewer: &Viewer, protocol: &Protocol) -> bool {
    match viewer.role {
        Role::Admin => true,
        Role::Director => protocol.is_director_member(viewer.user_id),
        Role::Student => protocol.is_student_member(viewer.user_id),
    }
}

/// Account management is admin-only; the nav entry and route stay hidden for
/// everyone else.
pub fn can_manage_accounts(viewer: &Viewer) -> bool {
    viewer.role == Role::Admin
}

/// Catalog rows (students, directors, departments) are admin-only to mutate.
pub fn can_manage_catalog(viewer: &Viewer) -> bool {
    viewer.role == Role::Admin
}

/// The "new protocol" entry point is hidden from students; the backing routes
/// are additionally role-guarded.
pub fn can_create_protocols(viewer: &Viewer) -> bool {
    viewer.role != Role::Student
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use protocolos_core::{
        AssignmentId, BoletaId, Department, DepartmentId, DirectorAssignment, ProtocolId,
        ProtocolStatus, UserAccount, WorkerId,
    };

    use super::*;

    fn account(id: i64, role: Role) -> UserAccount {
        UserAccount {
            id: UserId::new(id),
            email: format!("user{id}@ipn.mx"),
            role,
            password: None,
            created_at: None,
        }
    }

    fn student(boleta: i64, user: Option<i64>) -> Student {
        Student {
            boleta: BoletaId::new(boleta),
            first_name: format!("Alumno{boleta}"),
            paternal_surname: String::new(),
            maternal_surname: String::new(),
            program: "ISC".into(),
            semester: "7".into(),
            phone: String::new(),
            account: user.map(|id| account(id, Role::Student)),
        }
    }

    fn director(worker: i64, user: Option<i64>, dept: Option<i64>) -> Director {
        Director {
            worker_id: WorkerId::new(worker),
            first_name: format!("Director{worker}"),
            paternal_surname: String::new(),
            maternal_surname: String::new(),
            school: "ESCOM".into(),
            title: "Docente".into(),
            phone: String::new(),
            department: dept.map(|id| department(id)),
            account: user.map(|id| account(id, Role::Director)),
        }
    }

    fn department(id: i64) -> Department {
        Department {
            id: DepartmentId::new(id),
            name: format!("Departamento {id}"),
            code: format!("D{id}"),
            head_name: String::new(),
        }
    }

    fn protocol(id: i64, students: Vec<Student>, directors: Vec<Director>) -> Protocol {
        let mut slots = students.into_iter();
        Protocol {
            id: ProtocolId::new(id),
            title: format!("Protocolo {id}"),
            description: String::new(),
            objectives: String::new(),
            required_profile: String::new(),
            status: ProtocolStatus::Pending,
            registered_at: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            student1: slots.next(),
            student2: slots.next(),
            student3: slots.next(),
            student4: slots.next(),
            assignments: directors
                .into_iter()
                .enumerate()
                .map(|(i, d)| DirectorAssignment {
                    id: AssignmentId::new(id * 100 + i as i64),
                    director: d,
                })
                .collect(),
        }
    }

    fn viewer(id: i64, role: Role) -> Viewer {
        Viewer::new(UserId::new(id), role)
    }

    // Shared fixture:
    //   protocol 7: alumno2 = student 2021630001 (user 12), director 900 (user 30)
    //   protocol 8: student 2021630002 (user 13), directors 900 and 901 (users 30, 31)
    //   protocol 9: no members with linked accounts
    fn world() -> (Vec<Protocol>, Vec<Student>, Vec<Director>, Vec<Department>) {
        let s1 = student(2021630001, Some(12));
        let s2 = student(2021630002, Some(13));
        let s3 = student(2021630003, None);
        let d1 = director(900, Some(30), Some(3));
        let d2 = director(901, Some(31), None);
        let d3 = director(902, Some(32), Some(4));

        let mut p7 = protocol(7, vec![s1.clone()], vec![d1.clone()]);
        // slot 1 empty, member sits in slot 2: nulls must be skipped
        p7.student2 = p7.student1.take();

        let p8 = protocol(8, vec![s2.clone()], vec![d1.clone(), d2.clone()]);
        let p9 = protocol(9, vec![s3.clone()], vec![]);

        (
            vec![p7, p8, p9],
            vec![s1, s2, s3],
            vec![d1, d2, d3],
            vec![department(3), department(4)],
        )
    }

    #[test]
    fn admin_sees_everything() {
        let (protocols, students, directors, departments) = world();
        let admin = viewer(1, Role::Admin);

        assert_eq!(member_protocols(&admin, &protocols).len(), 3);
        assert_eq!(visible_students(&admin, &protocols, &students).len(), 3);
        assert_eq!(visible_directors(&admin, &protocols, &directors).len(), 3);
        assert_eq!(visible_departments(&admin, None, &departments).len(), 2);
        assert!(can_manage_accounts(&admin));
        assert!(can_manage_catalog(&admin));
    }

    #[test]
    fn member_protocols_is_exactly_the_membership_subset() {
        let (protocols, ..) = world();

        // Student 12 sits in slot 2 of protocol 7 only (scenario A).
        let student12 = viewer(12, Role::Student);
        let mine = member_protocols(&student12, &protocols);
        assert_eq!(
            mine.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![ProtocolId::new(7)]
        );

        // Director 30 is assigned to protocols 7 and 8.
        let dir30 = viewer(30, Role::Director);
        let mine = member_protocols(&dir30, &protocols);
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|p| p.is_director_member(UserId::new(30))));
    }

    #[test]
    fn student_without_membership_still_sees_own_profile() {
        let (_, students, ..) = world();
        let protocols: Vec<Protocol> = Vec::new();

        let student13 = viewer(13, Role::Student);
        let visible = visible_students(&student13, &protocols, &students);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].boleta, BoletaId::new(2021630002));
    }

    #[test]
    fn student_sees_teammates_but_not_strangers() {
        let (protocols, students, ..) = world();
        let student12 = viewer(12, Role::Student);

        let visible = visible_students(&student12, &protocols, &students);
        let boletas: Vec<_> = visible.iter().map(|s| s.boleta).collect();
        // Own slot on protocol 7; students of protocols 8/9 are invisible.
        assert_eq!(boletas, vec![BoletaId::new(2021630001)]);
    }

    #[test]
    fn director_sees_colleagues_through_shared_protocols() {
        let (protocols, _, directors, _) = world();
        let dir31 = viewer(31, Role::Director);

        let visible = visible_directors(&dir31, &protocols, &directors);
        let workers: Vec<_> = visible.iter().map(|d| d.worker_id).collect();
        // Via protocol 8: colleague 900 plus self 901. 902 stays invisible.
        assert_eq!(workers, vec![WorkerId::new(900), WorkerId::new(901)]);
    }

    #[test]
    fn director_with_no_protocols_sees_only_self() {
        let (_, _, directors, _) = world();
        let protocols: Vec<Protocol> = Vec::new();

        let dir32 = viewer(32, Role::Director);
        let visible = visible_directors(&dir32, &protocols, &directors);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].worker_id, WorkerId::new(902));
    }

    #[test]
    fn director_department_visibility_is_own_reference_only() {
        let (_, _, directors, departments) = world();

        let dir30 = viewer(30, Role::Director);
        let own = director_profile(&dir30, &directors);
        let visible = visible_departments(&dir30, own, &departments);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, DepartmentId::new(3));
    }

    #[test]
    fn director_without_department_sees_empty_not_error() {
        let (_, _, directors, departments) = world();

        let dir31 = viewer(31, Role::Director);
        let own = director_profile(&dir31, &directors);
        assert!(own.is_some());
        assert!(visible_departments(&dir31, own, &departments).is_empty());
    }

    #[test]
    fn students_never_see_departments() {
        let (_, _, _, departments) = world();
        let student12 = viewer(12, Role::Student);
        assert!(visible_departments(&student12, None, &departments).is_empty());
    }

    #[test]
    fn stale_department_reference_filters_to_empty() {
        // Scenario B: department 3 deleted while director 900 still points at
        // it. The reload simply yields no match; nothing cascades or errors.
        let (_, _, directors, _) = world();
        let remaining = vec![department(4)];

        let dir30 = viewer(30, Role::Director);
        let own = director_profile(&dir30, &directors);
        assert!(visible_departments(&dir30, own, &remaining).is_empty());
    }

    #[test]
    fn mutation_requires_assignment_on_that_protocol() {
        let (protocols, ..) = world();
        let dir31 = viewer(31, Role::Director);

        // Assigned to protocol 8, not to protocol 7 (scenario C).
        assert!(!can_modify_protocol(&dir31, &protocols[0]));
        assert!(can_modify_protocol(&dir31, &protocols[1]));
    }

    #[test]
    fn students_never_get_mutation_permission() {
        let (protocols, ..) = world();
        let student12 = viewer(12, Role::Student);

        for p in &protocols {
            assert!(!can_modify_protocol(&student12, p));
        }
        assert!(!can_manage_catalog(&student12));
        assert!(!can_manage_accounts(&student12));
        assert!(!can_create_protocols(&student12));
    }

    #[test]
    fn reporting_is_broader_than_mutation_for_students() {
        let (protocols, ..) = world();
        let student12 = viewer(12, Role::Student);

        // Member of protocol 7: may report, may never edit.
        assert!(can_report_protocol(&student12, &protocols[0]));
        assert!(!can_modify_protocol(&student12, &protocols[0]));

        // Not a member of protocol 8: no reporting either.
        assert!(!can_report_protocol(&student12, &protocols[1]));
    }

    #[test]
    fn mutation_implies_reporting_for_admins_and_directors() {
        let (protocols, ..) = world();

        for v in [viewer(1, Role::Admin), viewer(30, Role::Director), viewer(31, Role::Director)] {
            for p in &protocols {
                if can_modify_protocol(&v, p) {
                    assert!(can_report_protocol(&v, p));
                }
            }
        }
    }

    #[test]
    fn unassigned_director_gets_read_only_detail() {
        // Scenario C in full: director 32 opens protocol 7.
        let (protocols, ..) = world();
        let dir32 = viewer(32, Role::Director);

        assert!(!can_modify_protocol(&dir32, &protocols[0]));
        assert!(!can_report_protocol(&dir32, &protocols[0]));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let (protocols, students, directors, departments) = world();

        for role in Role::ALL {
            let v = viewer(12, role);
            let first: Vec<_> = visible_students(&v, &protocols, &students)
                .iter()
                .map(|s| s.boleta)
                .collect();
            let second: Vec<_> = visible_students(&v, &protocols, &students)
                .iter()
                .map(|s| s.boleta)
                .collect();
            assert_eq!(first, second);

            let own = director_profile(&v, &directors);
            assert_eq!(
                visible_departments(&v, own, &departments),
                visible_departments(&v, own, &departments)
            );
        }
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn arb_world() -> impl Strategy<Value = Vec<Protocol>> {
            proptest::collection::vec(
                (
                    proptest::collection::vec(
                        (1000i64..1040, proptest::option::of(1i64..40)),
                        0..4,
                    ),
                    proptest::collection::vec(
                        (500i64..540, proptest::option::of(1i64..40)),
                        0..3,
                    ),
                ),
                0..6,
            )
            .prop_map(|entries| {
                entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, (students, directors))| {
                        protocol(
                            i as i64 + 1,
                            students.into_iter().map(|(b, u)| student(b, u)).collect(),
                            directors
                                .into_iter()
                                .map(|(w, u)| director(w, u, None))
                                .collect(),
                        )
                    })
                    .collect()
            })
        }

        proptest! {
            /// Non-admin visible protocols are a subset of the input and are
            /// exactly the membership subset.
            #[test]
            fn visible_protocols_is_membership_subset(
                protocols in arb_world(),
                user in 1i64..40,
                role_idx in 1usize..3,
            ) {
                let v = viewer(user, Role::ALL[role_idx]);
                let mine = member_protocols(&v, &protocols);

                prop_assert!(mine.len() <= protocols.len());
                for p in &protocols {
                    let member = p.is_student_member(v.user_id)
                        || p.is_director_member(v.user_id);
                    let listed = mine.iter().any(|m| m.id == p.id);
                    prop_assert_eq!(member, listed);
                }
            }

            /// Evaluating twice over identical inputs yields identical output.
            #[test]
            fn evaluation_is_idempotent(
                protocols in arb_world(),
                user in 1i64..40,
                role_idx in 0usize..3,
            ) {
                let v = viewer(user, Role::ALL[role_idx]);
                let a: Vec<_> = member_protocols(&v, &protocols).iter().map(|p| p.id).collect();
                let b: Vec<_> = member_protocols(&v, &protocols).iter().map(|p| p.id).collect();
                prop_assert_eq!(a, b);
            }
        }
    }
}
