#![forbid(unsafe_code)]

use std::path::PathBuf;
use td_core::ids::UserId;
use td_core::view::View;
use td_storage::{CreateListRequest, CreateTaskRequest, SqliteStore, TaskQuery};

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("td_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn user(id: &str) -> UserId {
    UserId::try_new(id).expect("user id")
}

const DAY_END: i64 = 2_000_000_000_000;

fn query(view: View) -> TaskQuery {
    TaskQuery {
        view,
        list_id: None,
        search: None,
    }
}

#[test]
fn inbox_scopes_by_list_presence() {
    let mut store = SqliteStore::open(temp_dir("inbox_scopes")).expect("open store");
    let alice = user("alice");

    let list = store
        .create_list(
            &alice,
            CreateListRequest {
                title: "Groceries".to_string(),
                color: None,
            },
        )
        .expect("create list");

    let in_list = store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "Buy milk".to_string(),
                list_id: Some(list.id.clone()),
                ..Default::default()
            },
        )
        .expect("create task in list");
    let unassigned = store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "Stretch".to_string(),
                ..Default::default()
            },
        )
        .expect("create unassigned task");

    let default_inbox = store
        .tasks_as_of(&alice, query(View::Inbox), DAY_END)
        .expect("inbox without list");
    assert_eq!(
        default_inbox.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        vec![unassigned.id.as_str()]
    );

    let list_inbox = store
        .tasks_as_of(
            &alice,
            TaskQuery {
                view: View::Inbox,
                list_id: Some(list.id.clone()),
                search: None,
            },
            DAY_END,
        )
        .expect("inbox scoped to list");
    assert_eq!(
        list_inbox.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        vec![in_list.id.as_str()]
    );
}

#[test]
fn due_task_membership_flips_on_completion() {
    let mut store = SqliteStore::open(temp_dir("membership_flips")).expect("open store");
    let alice = user("alice");

    let created = store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "File report".to_string(),
                due_at_ms: Some(DAY_END - 3_600_000),
                ..Default::default()
            },
        )
        .expect("create task");

    for view in [View::Today, View::Scheduled, View::All] {
        let tasks = store
            .tasks_as_of(&alice, query(view), DAY_END)
            .expect("list view");
        assert_eq!(tasks.len(), 1, "{} should contain the task", view.as_str());
    }
    assert!(
        store
            .tasks_as_of(&alice, query(View::Completed), DAY_END)
            .expect("completed view")
            .is_empty()
    );

    store
        .complete_task(&alice, &created.id)
        .expect("complete task");

    for view in [View::Today, View::Scheduled, View::All] {
        assert!(
            store
                .tasks_as_of(&alice, query(view), DAY_END)
                .expect("list view")
                .is_empty(),
            "{} should no longer contain the task",
            view.as_str()
        );
    }
    let completed = store
        .tasks_as_of(&alice, query(View::Completed), DAY_END)
        .expect("completed view");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, created.id);
}

#[test]
fn today_excludes_due_dates_past_day_end() {
    let mut store = SqliteStore::open(temp_dir("today_boundary")).expect("open store");
    let alice = user("alice");

    store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "At the boundary".to_string(),
                due_at_ms: Some(DAY_END),
                ..Default::default()
            },
        )
        .expect("create boundary task");
    store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "Tomorrow".to_string(),
                due_at_ms: Some(DAY_END + 1),
                ..Default::default()
            },
        )
        .expect("create later task");

    let today = store
        .tasks_as_of(&alice, query(View::Today), DAY_END)
        .expect("today view");
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].title, "At the boundary");

    let scheduled = store
        .tasks_as_of(&alice, query(View::Scheduled), DAY_END)
        .expect("scheduled view");
    assert_eq!(scheduled.len(), 2);
}

#[test]
fn equal_positions_order_by_creation_and_stay_stable() {
    let mut store = SqliteStore::open(temp_dir("ordering")).expect("open store");
    let alice = user("alice");

    let first = store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "First".to_string(),
                position: 5,
                ..Default::default()
            },
        )
        .expect("create first");
    let second = store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "Second".to_string(),
                position: 5,
                ..Default::default()
            },
        )
        .expect("create second");
    let front = store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "Front".to_string(),
                position: 1,
                ..Default::default()
            },
        )
        .expect("create front");

    let expected = vec![front.id.clone(), first.id.clone(), second.id.clone()];
    for _ in 0..3 {
        let tasks = store
            .tasks_as_of(&alice, query(View::All), DAY_END)
            .expect("all view");
        assert_eq!(
            tasks.iter().map(|t| t.id.clone()).collect::<Vec<_>>(),
            expected
        );
    }
}

#[test]
fn search_layers_on_top_of_any_view() {
    let mut store = SqliteStore::open(temp_dir("search")).expect("open store");
    let alice = user("alice");

    store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "Buy MILK".to_string(),
                ..Default::default()
            },
        )
        .expect("create milk task");
    let bread = store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "Buy bread".to_string(),
                ..Default::default()
            },
        )
        .expect("create bread task");
    store.complete_task(&alice, &bread.id).expect("complete bread");

    let matches = store
        .tasks_as_of(
            &alice,
            TaskQuery {
                view: View::All,
                list_id: None,
                search: Some("milk".to_string()),
            },
            DAY_END,
        )
        .expect("search all");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].title, "Buy MILK");

    // the completed view composes with search the same way
    let done = store
        .tasks_as_of(
            &alice,
            TaskQuery {
                view: View::Completed,
                list_id: None,
                search: Some("BREAD".to_string()),
            },
            DAY_END,
        )
        .expect("search completed");
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, bread.id);
}

#[test]
fn search_wildcards_pass_through_to_like() {
    let mut store = SqliteStore::open(temp_dir("search_wildcards")).expect("open store");
    let alice = user("alice");

    store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "Buy bread".to_string(),
                ..Default::default()
            },
        )
        .expect("create bread task");

    // `%` spans characters inside the term, just like the transport search
    let spanned = store
        .tasks_as_of(
            &alice,
            TaskQuery {
                view: View::All,
                list_id: None,
                search: Some("b%d".to_string()),
            },
            DAY_END,
        )
        .expect("wildcard search");
    assert_eq!(spanned.len(), 1);
    assert_eq!(spanned[0].title, "Buy bread");

    let miss = store
        .tasks_as_of(
            &alice,
            TaskQuery {
                view: View::All,
                list_id: None,
                search: Some("bxd".to_string()),
            },
            DAY_END,
        )
        .expect("plain search");
    assert_eq!(miss.len(), 0);
}

#[test]
fn views_never_leak_across_owners() {
    let mut store = SqliteStore::open(temp_dir("owner_scope")).expect("open store");
    let alice = user("alice");
    let bob = user("bob");

    store
        .create_task(
            &alice,
            CreateTaskRequest {
                title: "Alice task".to_string(),
                ..Default::default()
            },
        )
        .expect("create alice task");

    assert!(
        store
            .tasks_as_of(&bob, query(View::All), DAY_END)
            .expect("bob view")
            .is_empty()
    );
}

#[test]
fn unknown_view_token_defaults_to_inbox() {
    assert_eq!(View::parse(Some("someday")), View::Inbox);
    assert_eq!(View::parse(None), View::Inbox);
}
