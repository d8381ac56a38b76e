use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use userdir::{
    Action, Directory, DirectoryError, ListState, MatchField, Record, RecordSource, Route, Router,
};

const WAIT: Duration = Duration::from_secs(5);

struct StaticSource(Vec<Record>);

impl RecordSource for StaticSource {
    fn fetch_all(&self) -> userdir::Result<Vec<Record>> {
        Ok(self.0.clone())
    }

    fn fetch_one(&self, id: u64) -> userdir::Result<Record> {
        self.0
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::from_status(404, "test"))
    }
}

struct DownSource;

impl RecordSource for DownSource {
    fn fetch_all(&self) -> userdir::Result<Vec<Record>> {
        Err(DirectoryError::from_status(503, "http://test/users"))
    }

    fn fetch_one(&self, _id: u64) -> userdir::Result<Record> {
        Err(DirectoryError::from_status(503, "http://test/users"))
    }
}

/// Each fetch blocks until the test hands it a collection
struct ScriptedSource {
    replies: Mutex<Receiver<Vec<Record>>>,
}

impl RecordSource for ScriptedSource {
    fn fetch_all(&self) -> userdir::Result<Vec<Record>> {
        let reply = self.replies.lock().recv_timeout(WAIT);
        reply.map_err(|_| DirectoryError::from_status(504, "scripted"))
    }

    fn fetch_one(&self, _id: u64) -> userdir::Result<Record> {
        Err(DirectoryError::from_status(404, "scripted"))
    }
}

fn users(n: u64) -> Vec<Record> {
    (1..=n)
        .map(|i| Record::new(i, format!("U{}", i), format!("u{}@example.com", i)))
        .collect()
}

fn mounted(records: Vec<Record>) -> Directory {
    let mut dir = Directory::new(Arc::new(StaticSource(records)), MatchField::default_set());
    assert!(dir.load());
    assert!(dir.wait(WAIT));
    dir
}

fn names(view: &userdir::DirectoryView) -> Vec<&str> {
    view.page_items.iter().map(|r| r.display_name.as_str()).collect()
}

#[test]
fn first_page_of_twenty_five() {
    let dir = mounted(users(25));
    let view = dir.snapshot();

    assert_eq!(names(&view), (1..=10).map(|i| format!("U{}", i)).collect::<Vec<_>>());
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.range_label(), "Showing 1 to 10 of 25");
    assert!(!view.can_go_prev);
    assert!(view.can_go_next);
    assert_eq!(view.state, ListState::Idle);
}

#[test]
fn next_page_shows_second_slice() {
    let mut dir = mounted(users(25));
    let view = dir.dispatch(Action::NextPage);

    assert_eq!(view.page_number, 2);
    assert_eq!(names(&view).first(), Some(&"U11"));
    assert_eq!(names(&view).last(), Some(&"U20"));
    assert_eq!(view.range_label(), "Showing 11 to 20 of 25");
    assert!(view.can_go_prev && view.can_go_next);

    let view = dir.dispatch(Action::NextPage);
    assert_eq!(view.range_label(), "Showing 21 to 25 of 25");
    assert!(!view.can_go_next);
    // Past the end is a no-op
    assert_eq!(dir.dispatch(Action::NextPage).page_number, 3);
}

#[test]
fn search_without_matches_is_empty() {
    let mut dir = mounted(users(25));
    dir.dispatch(Action::NextPage);
    dir.dispatch(Action::Edit("zzz".into()));
    let view = dir.dispatch(Action::Submit);

    assert!(view.is_empty());
    assert_eq!(view.total_matches, 0);
    assert_eq!(view.page_number, 1);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.range_label(), "Showing 0 to 0 of 0");
    assert!(!view.can_go_prev && !view.can_go_next);
    assert_eq!(view.state, ListState::Filtered);
}

#[test]
fn whitespace_submit_raises_validation() {
    let mut dir = mounted(users(25));
    dir.dispatch(Action::Edit("   ".into()));
    let view = dir.dispatch(Action::Submit);

    assert!(view.validation_error);
    assert_eq!(view.state, ListState::ErrorPending);
    assert_eq!(view.total_matches, 25);
    assert_eq!(dir.committed_term(), "");

    let view = dir.dispatch(Action::Edit("  u".into()));
    assert!(!view.validation_error);
}

#[test]
fn failed_fetch_leaves_empty_list() {
    let mut dir = Directory::new(Arc::new(DownSource), MatchField::default_set());
    dir.load();
    assert!(dir.wait(WAIT));

    let view = dir.snapshot();
    assert!(!view.is_loading);
    assert!(view.is_empty());
    assert_eq!(view.range_label(), "Showing 0 to 0 of 0");
    assert!(dir.last_error().is_some_and(|e| e.contains("503")));
}

#[test]
fn search_matches_email_case_insensitively() {
    let mut records = users(25);
    records[4].email = "Sincere@April.biz".into();
    let mut dir = mounted(records);

    dir.dispatch(Action::Edit("  APRIL ".into()));
    let view = dir.dispatch(Action::Submit);
    assert_eq!(names(&view), vec!["U5"]);
    assert_eq!(dir.committed_term(), "APRIL");
}

#[test]
fn filtered_results_keep_source_order() {
    let mut dir = mounted(users(25));
    dir.dispatch(Action::Edit("u1".into()));
    let view = dir.dispatch(Action::Submit);

    // U1, U10..U19
    assert_eq!(view.total_matches, 11);
    let ids: Vec<u64> = view.page_items.iter().map(|r| r.id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids[0], 1);
}

#[test]
fn resubmitting_the_same_term_is_idempotent() {
    let mut dir = mounted(users(25));
    dir.dispatch(Action::Edit("u2".into()));
    let first = dir.dispatch(Action::Submit);
    let second = dir.dispatch(Action::Submit);
    assert_eq!(first, second);
}

#[test]
fn clearing_the_input_restores_the_full_list() {
    let mut dir = mounted(users(25));
    dir.dispatch(Action::Edit("u2".into()));
    dir.dispatch(Action::Submit);

    let view = dir.dispatch(Action::Edit(String::new()));
    assert_eq!(view.total_matches, 25);
    assert_eq!(view.state, ListState::Idle);

    dir.dispatch(Action::Edit("u2".into()));
    dir.dispatch(Action::Submit);
    let view = dir.dispatch(Action::Clear);
    assert_eq!(view.raw_input, "");
    assert_eq!(view.total_matches, 25);
}

#[test]
fn editing_does_not_filter_until_submit() {
    let mut dir = mounted(users(25));
    let view = dir.dispatch(Action::Edit("u2".into()));
    assert_eq!(view.raw_input, "u2");
    assert_eq!(view.total_matches, 25);
}

#[test]
fn row_select_routes_to_detail() {
    let mut dir = mounted(users(25));
    let mut router = Router::new();
    dir.dispatch(Action::NextPage);

    assert_eq!(dir.select_row(0, &mut router), Some(11));
    assert_eq!(router.current(), Route::Detail(11));
    assert_eq!(dir.select_row(10, &mut router), None);
}

#[test]
fn response_after_unmount_is_ignored() {
    let (tx, rx): (Sender<Vec<Record>>, Receiver<Vec<Record>>) = bounded(1);
    let source = ScriptedSource {
        replies: Mutex::new(rx),
    };
    let mut dir = Directory::new(Arc::new(source), MatchField::default_set());
    dir.load();
    assert_eq!(dir.state(), ListState::Loading);

    dir.unmount();
    tx.send(users(5)).unwrap();
    assert!(!dir.wait(Duration::from_millis(200)));
    assert!(dir.records().is_empty());
}

#[test]
fn reload_fetches_again() {
    let (tx, rx) = bounded(2);
    let source = ScriptedSource {
        replies: Mutex::new(rx),
    };
    let mut dir = Directory::new(Arc::new(source), MatchField::default_set());
    dir.load();
    tx.send(users(3)).unwrap();
    assert!(dir.wait(WAIT));
    assert_eq!(dir.records().len(), 3);
    dir.dispatch(Action::Edit("u1".into()));
    dir.dispatch(Action::Submit);

    dir.reload();
    let view = dir.snapshot();
    assert!(view.is_loading);
    assert_eq!(view.raw_input, "");
    assert_eq!(dir.committed_term(), "");
    tx.send(users(12)).unwrap();
    assert!(dir.wait(WAIT));
    assert_eq!(dir.snapshot().total_pages, 2);
}
