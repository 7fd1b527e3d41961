use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    BoardService, Clock, Priority, SqliteTaskRepository, TaskDraft, TaskPatch, TaskRepository,
    TaskStatus,
};
use uuid::Uuid;

struct FixedClock(&'static str);

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.to_string()
    }
}

const STAMP: &str = "2026-08-05T12:00:00.000Z";

fn draft(title: &str, status: TaskStatus) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: None,
        priority: Priority::High,
        status,
    }
}

fn service(conn: &rusqlite::Connection) -> BoardService<SqliteTaskRepository<'_>> {
    let repo = SqliteTaskRepository::try_new(conn).unwrap();
    BoardService::with_clock(repo, Box::new(FixedClock(STAMP)))
}

#[test]
fn add_task_stamps_identity_and_syncs_mirror() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    let id = board.add_task(draft("plan sprint", TaskStatus::Todo)).unwrap();

    let mirrored = &board.tasks()[0];
    assert_eq!(mirrored.id, id);
    assert_eq!(mirrored.created_at, STAMP);

    let reader = SqliteTaskRepository::try_new(&conn).unwrap();
    assert_eq!(reader.load_all(), board.tasks());
}

#[test]
fn blank_title_is_rejected_before_the_store() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    assert!(board.add_task(draft("   ", TaskStatus::Todo)).is_none());
    assert!(board.tasks().is_empty());

    let reader = SqliteTaskRepository::try_new(&conn).unwrap();
    assert!(reader.load_all().is_empty());
}

#[test]
fn blank_description_is_normalized_away() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    let mut input = draft("  trim me  ", TaskStatus::Todo);
    input.description = Some("   ".to_string());
    let id = board.add_task(input).unwrap();

    let reader = SqliteTaskRepository::try_new(&conn).unwrap();
    let stored = reader.get_by_id(id).unwrap();
    assert_eq!(stored.title, "trim me");
    assert_eq!(stored.description, None);
}

#[test]
fn drag_moves_task_between_columns() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    let a = board.add_task(draft("task a", TaskStatus::Todo)).unwrap();
    let b = board.add_task(draft("task b", TaskStatus::Todo)).unwrap();

    assert!(board.move_task(b, TaskStatus::Done));

    let reader = SqliteTaskRepository::try_new(&conn).unwrap();
    let stored = reader.load_all();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].id, a);
    assert_eq!(stored[0].status, TaskStatus::Todo);
    assert_eq!(stored[1].id, b);
    assert_eq!(stored[1].status, TaskStatus::Done);

    let view = board.board("");
    assert_eq!(view.todo.len(), 1);
    assert_eq!(view.todo.cards[0].task.id, a);
    assert_eq!(view.done.len(), 1);
    assert_eq!(view.done.cards[0].task.id, b);
}

#[test]
fn drag_keeps_created_at_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    let id = board.add_task(draft("timed", TaskStatus::Todo)).unwrap();
    assert!(board.move_task(id, TaskStatus::InProgress));

    let reader = SqliteTaskRepository::try_new(&conn).unwrap();
    let stored = reader.get_by_id(id).unwrap();
    assert_eq!(stored.created_at, STAMP);
    assert_eq!(stored.title, "timed");
    assert_eq!(stored.priority, Priority::High);
}

#[test]
fn drop_on_origin_column_is_a_quiet_no_op() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    let id = board.add_task(draft("stay put", TaskStatus::InProgress)).unwrap();
    let before = board.tasks().to_vec();

    assert!(board.move_task(id, TaskStatus::InProgress));
    assert_eq!(board.tasks(), before.as_slice());

    let reader = SqliteTaskRepository::try_new(&conn).unwrap();
    assert_eq!(reader.load_all(), before);
}

#[test]
fn drag_of_stale_id_fails_and_leaves_board_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    board.add_task(draft("real", TaskStatus::Todo)).unwrap();
    let before = board.tasks().to_vec();

    assert!(!board.move_task(Uuid::new_v4(), TaskStatus::Done));
    assert_eq!(board.tasks(), before.as_slice());
}

#[test]
fn rejected_update_leaves_mirror_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    board.add_task(draft("only one", TaskStatus::Todo)).unwrap();
    let before = board.tasks().to_vec();

    let patch = TaskPatch {
        title: Some("never applied".to_string()),
        ..TaskPatch::default()
    };
    assert!(!board.update_task(Uuid::new_v4(), &patch));
    assert_eq!(board.tasks(), before.as_slice());
}

#[test]
fn update_resyncs_when_mirror_is_stale() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    // A second writer puts a task in durable state behind the mirror's back.
    let writer = SqliteTaskRepository::try_new(&conn).unwrap();
    let hidden = taskdeck_core::Task::new(draft("out of band", TaskStatus::Todo), STAMP);
    assert!(writer.create(&hidden));
    assert!(board.tasks().is_empty());

    let patch = TaskPatch::status_only(TaskStatus::Done);
    assert!(board.update_task(hidden.id, &patch));

    assert_eq!(board.tasks().len(), 1);
    assert_eq!(board.tasks()[0].status, TaskStatus::Done);
}

#[test]
fn remove_task_syncs_mirror_and_store() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    let keep = board.add_task(draft("keep", TaskStatus::Todo)).unwrap();
    let discard = board.add_task(draft("discard", TaskStatus::Todo)).unwrap();

    assert!(board.remove_task(discard));
    assert!(!board.remove_task(discard));

    assert_eq!(board.tasks().len(), 1);
    assert_eq!(board.tasks()[0].id, keep);

    let reader = SqliteTaskRepository::try_new(&conn).unwrap();
    assert_eq!(reader.load_all(), board.tasks());
}

#[test]
fn refresh_picks_up_external_changes() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    let writer = SqliteTaskRepository::try_new(&conn).unwrap();
    let external = taskdeck_core::Task::new(draft("external", TaskStatus::Done), STAMP);
    writer.create(&external);

    assert!(board.tasks().is_empty());
    board.refresh();
    assert_eq!(board.tasks(), &[external]);
}

#[test]
fn search_dims_but_never_removes_cards() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    board.add_task(draft("Write Spec", TaskStatus::Todo)).unwrap();
    board.add_task(draft("Review code", TaskStatus::Done)).unwrap();

    let view = board.board("spec");
    assert_eq!(view.total(), 2);
    assert_eq!(view.match_count(), 1);
    assert!(view.todo.cards[0].matched);
    assert!(!view.done.cards[0].matched);
}

#[test]
fn clear_board_empties_mirror_and_store() {
    let conn = open_db_in_memory().unwrap();
    let mut board = service(&conn);

    board.add_task(draft("gone soon", TaskStatus::Todo)).unwrap();
    board.clear_board();
    board.clear_board();

    assert!(board.tasks().is_empty());
    let reader = SqliteTaskRepository::try_new(&conn).unwrap();
    assert!(reader.load_all().is_empty());
}

#[test]
fn cold_start_loads_existing_collection() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut board = service(&conn);
        board.add_task(draft("persisted", TaskStatus::Todo)).unwrap();
    }

    let board = service(&conn);
    assert_eq!(board.tasks().len(), 1);
    assert_eq!(board.tasks()[0].title, "persisted");
}
