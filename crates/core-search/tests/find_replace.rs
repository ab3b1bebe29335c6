//! Controller-level search and replace scenarios.

use core_highlight::Layer;
use core_search::{NOT_FOUND_MESSAGE, SearchController};
use core_session::{Notifier, SessionManager};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct RecordingNotifier {
    notices: Vec<String>,
    errors: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

fn manager_with(text: &str) -> SessionManager {
    let mut mgr = SessionManager::new();
    mgr.new_tab().buffer_mut().set_text(text);
    mgr
}

#[test]
fn find_selects_first_match_and_highlights_all() {
    let mut mgr = manager_with("hello world");
    let mut ctl = SearchController::new();
    let mut notifier = RecordingNotifier::default();

    ctl.find(&mut mgr, "world", &mut notifier);

    let session = mgr.active_session().unwrap();
    assert_eq!(session.buffer().selection(), Some((6, 11)));
    assert_eq!(session.styles().layer_spans(Layer::Search).count(), 1);
    assert!(notifier.notices.is_empty());
}

#[test]
fn find_miss_notifies_and_adds_no_highlight() {
    let mut mgr = manager_with("hello world");
    let mut ctl = SearchController::new();
    let mut notifier = RecordingNotifier::default();

    ctl.find(&mut mgr, "xyz", &mut notifier);

    assert_eq!(notifier.notices, [NOT_FOUND_MESSAGE]);
    let session = mgr.active_session().unwrap();
    assert_eq!(session.styles().layer_spans(Layer::Search).count(), 0);
}

#[test]
fn new_find_replaces_previous_highlights_and_resets_resume() {
    let mut mgr = manager_with("aaa bbb aaa");
    let mut ctl = SearchController::new();
    let mut notifier = RecordingNotifier::default();

    ctl.find(&mut mgr, "aaa", &mut notifier);
    ctl.find_next(&mut mgr, &mut notifier);
    assert!(ctl.state().resume() > 0);

    ctl.find(&mut mgr, "bbb", &mut notifier);
    assert_eq!(ctl.state().resume(), 0, "new term resets the resume offset");
    let session = mgr.active_session().unwrap();
    assert_eq!(
        session.styles().layer_spans(Layer::Search).count(),
        1,
        "old term's highlights are gone"
    );
}

#[test]
fn find_next_advances_then_wraps() {
    let mut mgr = manager_with("ab ab ab");
    let mut ctl = SearchController::new();
    let mut notifier = RecordingNotifier::default();

    ctl.find(&mut mgr, "ab", &mut notifier);
    // find selects the first hit but leaves resume at 0; the first find_next
    // re-lands on it and stores its end.
    ctl.find_next(&mut mgr, &mut notifier);
    assert_eq!(mgr.active_session().unwrap().buffer().selection(), Some((0, 2)));
    ctl.find_next(&mut mgr, &mut notifier);
    assert_eq!(mgr.active_session().unwrap().buffer().selection(), Some((3, 5)));
    ctl.find_next(&mut mgr, &mut notifier);
    assert_eq!(mgr.active_session().unwrap().buffer().selection(), Some((6, 8)));
    // wrap back to the start
    ctl.find_next(&mut mgr, &mut notifier);
    assert_eq!(mgr.active_session().unwrap().buffer().selection(), Some((0, 2)));
    assert!(notifier.notices.is_empty());
}

#[test]
fn find_next_single_occurrence_cycles_to_itself() {
    let mut mgr = manager_with("prefix needle suffix");
    let mut ctl = SearchController::new();
    let mut notifier = RecordingNotifier::default();

    ctl.find(&mut mgr, "needle", &mut notifier);
    ctl.find_next(&mut mgr, &mut notifier);
    let first = mgr.active_session().unwrap().buffer().selection();
    ctl.find_next(&mut mgr, &mut notifier);
    let second = mgr.active_session().unwrap().buffer().selection();
    assert_eq!(first, second, "wrap cycles back to the only occurrence");
}

#[test]
fn find_next_absent_term_terminates_with_not_found() {
    let mut mgr = manager_with("needle here");
    let mut ctl = SearchController::new();
    let mut notifier = RecordingNotifier::default();

    ctl.find(&mut mgr, "needle", &mut notifier);
    // Remove every occurrence behind the controller's back.
    mgr.active_session_mut()
        .unwrap()
        .buffer_mut()
        .set_text("nothing left");

    ctl.find_next(&mut mgr, &mut notifier);
    assert_eq!(notifier.notices, [NOT_FOUND_MESSAGE]);
}

#[test]
fn find_next_without_stored_term_is_noop() {
    let mut mgr = manager_with("anything");
    let mut ctl = SearchController::new();
    let mut notifier = RecordingNotifier::default();

    ctl.find_next(&mut mgr, &mut notifier);
    assert!(notifier.notices.is_empty());
    assert_eq!(mgr.active_session().unwrap().buffer().selection(), None);
}

#[test]
fn search_state_survives_tab_switch() {
    let mut mgr = manager_with("shared term here");
    mgr.new_tab().buffer_mut().set_text("another term");
    let mut ctl = SearchController::new();
    let mut notifier = RecordingNotifier::default();

    mgr.set_active(0);
    ctl.find(&mut mgr, "term", &mut notifier);
    ctl.find_next(&mut mgr, &mut notifier);

    // Switch tabs: the stored term repeats against the new active buffer,
    // with the stale resume offset clamped to its length.
    mgr.set_active(1);
    ctl.find_next(&mut mgr, &mut notifier);
    assert_eq!(
        mgr.active_session().unwrap().buffer().selection(),
        Some((8, 12))
    );
}

#[test]
fn replace_all_replaces_every_occurrence() {
    let mut mgr = manager_with("one fish two fish red fish");
    let mut ctl = SearchController::new();

    ctl.replace_all(&mut mgr, "fish", "cat");
    let session = mgr.active_session().unwrap();
    assert_eq!(session.buffer().text(), "one cat two cat red cat");
    assert!(session.modified());
}

#[test]
fn replace_all_is_case_sensitive() {
    let mut mgr = manager_with("Hello hello HELLO");
    let mut ctl = SearchController::new();

    ctl.replace_all(&mut mgr, "hello", "goodbye");
    assert_eq!(
        mgr.active_session().unwrap().buffer().text(),
        "Hello goodbye HELLO"
    );
}

#[test]
fn replace_with_empty_string_deletes_occurrences() {
    let mut mgr = manager_with("a-b-c");
    let mut ctl = SearchController::new();

    ctl.replace_all(&mut mgr, "-", "");
    assert_eq!(mgr.active_session().unwrap().buffer().text(), "abc");
}

#[test]
fn replace_term_with_itself_changes_nothing() {
    let mut mgr = manager_with("same same");
    mgr.active_session_mut().unwrap().buffer_mut().clear_modified();
    let depth = mgr.active_session().unwrap().buffer().undo_depth();
    let mut ctl = SearchController::new();

    ctl.replace_all(&mut mgr, "same", "same");
    let session = mgr.active_session().unwrap();
    assert_eq!(session.buffer().text(), "same same");
    assert!(!session.modified(), "no-op must not dirty the buffer");
    assert_eq!(session.buffer().undo_depth(), depth, "no undo entry");
}

#[test]
fn replace_all_is_one_undo_step() {
    let mut mgr = manager_with("x x x x");
    let mut ctl = SearchController::new();

    ctl.replace_all(&mut mgr, "x", "y");
    let buffer = mgr.active_session_mut().unwrap().buffer_mut();
    assert_eq!(buffer.text(), "y y y y");
    assert!(buffer.undo());
    assert_eq!(buffer.text(), "x x x x", "single undo restores everything");
}

#[test]
fn empty_find_term_aborts_replace() {
    let mut mgr = manager_with("untouched");
    let mut ctl = SearchController::new();

    ctl.replace_all(&mut mgr, "", "anything");
    assert_eq!(mgr.active_session().unwrap().buffer().text(), "untouched");
}
