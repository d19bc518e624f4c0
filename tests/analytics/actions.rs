use analytics_store::service::{
    CreateActionRequest, CreateProjectRequest, ListActionsRequest, RequestById,
    UpdateActionRequest,
};
use analytics_store::{Action, Analytics, Error, InMemoryKvStore, KvStore, Project, Session};

use crate::support::{analytics, LATER, NOW};

fn project(analytics: &Analytics<InMemoryKvStore>, session: &Session, name: &str) -> Project {
    analytics
        .create_project(
            session,
            CreateProjectRequest {
                name: name.into(),
                ..Default::default()
            },
        )
        .unwrap()
        .project
}

fn action(
    analytics: &Analytics<InMemoryKvStore>,
    session: &Session,
    project: &Project,
    name: &str,
) -> Action {
    analytics
        .create_action(
            session,
            CreateActionRequest {
                name: name.into(),
                description: format!("{name} action"),
                project: project.id.clone(),
            },
        )
        .unwrap()
        .action
}

fn value(analytics: &Analytics<InMemoryKvStore>, session: &Session, id: &str) -> i64 {
    analytics
        .get_action(session, RequestById::new(id))
        .unwrap()
        .action
        .value
}

// ============================================================================
// Create
// ============================================================================

#[test]
fn create_action_under_project() {
    let (analytics, store, _) = analytics();
    let session = Session::new();
    let p = project(&analytics, &session, "P1");

    let a = action(&analytics, &session, &p, "A1");
    assert_eq!(a.value, 0);
    assert_eq!(a.project, p.id);
    assert_eq!(a.created, NOW);
    assert_eq!(a.created, a.updated);

    let key = format!("default:{}:{}:action", p.id, a.id);
    assert!(store.read(&key).is_ok());
}

#[test]
fn create_action_requires_name_and_existing_project() {
    let (analytics, _, _) = analytics();
    let session = Session::new();
    let p = project(&analytics, &session, "P1");

    let err = analytics
        .create_action(
            &session,
            CreateActionRequest {
                project: p.id.clone(),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = analytics
        .create_action(
            &session,
            CreateActionRequest {
                name: "A".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = analytics
        .create_action(
            &session,
            CreateActionRequest {
                name: "A".into(),
                project: "ghost".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, Error::NotFound("project not found".into()));
}

// ============================================================================
// Trigger / Reset
// ============================================================================

#[test]
fn trigger_three_times_then_reset() {
    let (analytics, _, _) = analytics();
    let session = Session::new();
    let p = project(&analytics, &session, "P1");
    let a = action(&analytics, &session, &p, "A1");

    for _ in 0..3 {
        analytics
            .trigger_action(&session, RequestById::new(&a.id))
            .unwrap();
    }
    assert_eq!(value(&analytics, &session, &a.id), 3);

    let reset = analytics
        .reset_action(&session, RequestById::new(&a.id))
        .unwrap()
        .action;
    assert_eq!(reset.value, 0);
    assert_eq!(value(&analytics, &session, &a.id), 0);
}

#[test]
fn sequential_triggers_count_exactly() {
    let (analytics, _, _) = analytics();
    let session = Session::new();
    let p = project(&analytics, &session, "P");
    let a = action(&analytics, &session, &p, "A");

    for n in 1..=25 {
        analytics
            .trigger_action(&session, RequestById::new(&a.id))
            .unwrap();
        assert_eq!(value(&analytics, &session, &a.id), n);
    }
}

#[test]
fn trigger_missing_action_is_not_found() {
    let (analytics, _, _) = analytics();
    let err = analytics
        .trigger_action(&Session::new(), RequestById::new("ghost"))
        .unwrap_err();
    assert_eq!(err, Error::NotFound("action not found".into()));
}

// ============================================================================
// Lookup by id
// ============================================================================

#[test]
fn lookup_by_id_requires_an_exact_id_match() {
    let (analytics, store, _) = analytics();
    let session = Session::new();
    let p = project(&analytics, &session, "P");
    let a = action(&analytics, &session, &p, "A");

    // A stored action whose id ends with the other one's id.
    let longer = Action {
        id: format!("x{}", a.id),
        ..a.clone()
    };
    store
        .write(
            &format!("default:{}:{}:action", p.id, longer.id),
            serde_json::to_vec(&longer).unwrap(),
        )
        .unwrap();

    let fetched = analytics
        .get_action(&session, RequestById::new(&a.id))
        .unwrap()
        .action;
    assert_eq!(fetched, a);
}

#[test]
fn duplicate_action_id_across_projects_is_reported() {
    let (analytics, store, _) = analytics();
    let session = Session::new();
    let p1 = project(&analytics, &session, "P1");
    let p2 = project(&analytics, &session, "P2");
    let a = action(&analytics, &session, &p1, "A");

    store
        .write(
            &format!("default:{}:{}:action", p2.id, a.id),
            serde_json::to_vec(&a).unwrap(),
        )
        .unwrap();

    let err = analytics
        .get_action(&session, RequestById::new(&a.id))
        .unwrap_err();
    assert!(matches!(err, Error::Internal(_)));
}

// ============================================================================
// Update / Delete
// ============================================================================

#[test]
fn update_action_keeps_value_and_project() {
    let (analytics, _, clock) = analytics();
    let session = Session::new();
    let p = project(&analytics, &session, "P");
    let a = action(&analytics, &session, &p, "A");
    analytics
        .trigger_action(&session, RequestById::new(&a.id))
        .unwrap();

    clock.set(LATER);
    let updated = analytics
        .update_action(
            &session,
            UpdateActionRequest {
                action: Some(Action {
                    id: a.id.clone(),
                    name: "renamed".into(),
                    ..Default::default()
                }),
            },
        )
        .unwrap()
        .action;

    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.description, a.description);
    assert_eq!(updated.value, 1);
    assert_eq!(updated.project, p.id);
    assert_eq!(updated.updated, LATER);
}

#[test]
fn update_action_with_empty_fields_does_not_mutate() {
    let (analytics, _, _) = analytics();
    let session = Session::new();
    let p = project(&analytics, &session, "P");
    let a = action(&analytics, &session, &p, "A");

    let err = analytics
        .update_action(
            &session,
            UpdateActionRequest {
                action: Some(Action {
                    id: a.id.clone(),
                    ..Default::default()
                }),
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let fetched = analytics
        .get_action(&session, RequestById::new(&a.id))
        .unwrap()
        .action;
    assert_eq!(fetched, a);
}

#[test]
fn delete_action_then_get_is_not_found() {
    let (analytics, _, _) = analytics();
    let session = Session::new();
    let p = project(&analytics, &session, "P");
    let a = action(&analytics, &session, &p, "A");

    let deleted = analytics
        .delete_action(&session, RequestById::new(&a.id))
        .unwrap()
        .action;
    assert_eq!(deleted, a);

    let err = analytics
        .get_action(&session, RequestById::new(&a.id))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

// ============================================================================
// List
// ============================================================================

#[test]
fn list_actions_of_project() {
    let (analytics, _, _) = analytics();
    let session = Session::new();
    let p1 = project(&analytics, &session, "P1");
    let p2 = project(&analytics, &session, "P2");
    action(&analytics, &session, &p1, "a");
    action(&analytics, &session, &p1, "b");
    action(&analytics, &session, &p2, "c");

    let mut names: Vec<String> = analytics
        .list_actions(
            &session,
            ListActionsRequest {
                project: p1.id.clone(),
            },
        )
        .unwrap()
        .actions
        .into_iter()
        .map(|a| a.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn list_actions_distinguishes_empty_from_missing_project() {
    let (analytics, _, _) = analytics();
    let session = Session::new();
    let p = project(&analytics, &session, "P");

    let actions = analytics
        .list_actions(
            &session,
            ListActionsRequest {
                project: p.id.clone(),
            },
        )
        .unwrap()
        .actions;
    assert!(actions.is_empty());

    let err = analytics
        .list_actions(
            &session,
            ListActionsRequest {
                project: "ghost".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
