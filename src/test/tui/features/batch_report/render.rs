use crate::batch::{BackupOutcome, BatchResult};
use crate::catalog::{CatalogLister, ConnectionError};
use crate::connection::ConnectionDescriptor;
use crate::export::{ExportError, Exporter};
use crate::tui::{BatchRun, Screen, Session, SessionConfig, SessionEvent};
use ratatui::{Terminal, backend::TestBackend};
use std::{cell::Cell, sync::Arc};

struct NoCatalog;

impl CatalogLister for NoCatalog {
    fn list(&self, _connection: &ConnectionDescriptor) -> Result<Vec<String>, ConnectionError> {
        Ok(Vec::new())
    }
}

struct NoopExporter;

impl Exporter for NoopExporter {
    fn export(&self, _connection: &ConnectionDescriptor, target: &str) -> Result<String, ExportError> {
        Ok(target.to_string())
    }
}

/// `db0..db<count>`, every one succeeding except `failing`.
fn report(count: usize, failing: Option<usize>) -> BatchResult {
    let outcomes = (0..count)
        .map(|idx| {
            let target = format!("db{idx}");
            if Some(idx) == failing {
                BackupOutcome::failed(target.clone(), format!("pg_dump: error: cannot dump {target}"))
            } else {
                BackupOutcome::succeeded(target.clone(), format!("{target}_20260101_120000.backup"))
            }
        })
        .collect();
    BatchResult::new(outcomes)
}

fn session_showing(result: BatchResult) -> Session {
    let mut session = Session::new(SessionConfig::default(), Arc::new(NoCatalog), Arc::new(NoopExporter));
    session.screen = Screen::BatchExecution(BatchRun {
        handle: None,
        total: result.len(),
        current: None,
        recorded: result.len(),
        result: Some(result),
        spinner_frame: 0,
        scroll: 0,
        max_scroll: Cell::new(0),
    });
    session
}

fn render(session: &Session, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal.draw(|frame| session.draw(frame)).expect("draw");
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..height {
        for x in 0..width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn report_scroll(session: &Session) -> (usize, usize) {
    let Screen::BatchExecution(run) = &session.screen else {
        panic!("expected batch execution screen");
    };
    (run.scroll, run.max_scroll.get())
}

#[test]
fn failure_is_visible_without_scrolling_a_long_report() {
    let session = session_showing(report(30, Some(29)));

    let screen = render(&session, 100, 30);

    assert!(screen.contains("✗ db29"), "failure missing from first page:\n{screen}");
    assert!(screen.contains("cannot dump db29"));
    assert!(screen.contains("1 failed"));
    assert!(screen.contains("rows 1-"));
}

#[test]
fn scrolling_stops_at_the_last_row_and_reverses_immediately() {
    let mut session = session_showing(report(30, None));
    let first_page = render(&session, 100, 20);
    assert!(first_page.contains("Backup finished"));
    assert!(!first_page.contains("✓ db29 "));

    for _ in 0..10 {
        session.handle_event(SessionEvent::Right);
    }
    let (scroll, max_scroll) = report_scroll(&session);
    assert!(max_scroll > 0);
    assert_eq!(scroll, max_scroll);

    let last_page = render(&session, 100, 20);
    assert!(last_page.contains("✓ db29 -> db29_20260101_120000.backup"));
    assert!(!last_page.contains("Backup finished"));

    session.handle_event(SessionEvent::Up);
    assert_eq!(report_scroll(&session).0, max_scroll - 1);
}

#[test]
fn short_report_does_not_scroll() {
    let mut session = session_showing(report(2, Some(0)));
    let screen = render(&session, 100, 30);
    assert!(!screen.contains("rows "));

    session.handle_event(SessionEvent::Down);
    assert_eq!(report_scroll(&session), (0, 0));
}

#[test]
fn long_diagnostics_wrap_inside_the_report() {
    let mut result = report(1, None);
    result = BatchResult::new(
        result
            .outcomes()
            .iter()
            .cloned()
            .chain([BackupOutcome::failed("wide", "x".repeat(150))])
            .collect(),
    );
    let session = session_showing(result);

    let screen = render(&session, 60, 30);

    let wrapped: usize = screen.lines().map(|line| line.matches('x').count()).sum();
    assert_eq!(wrapped, 150);
}
