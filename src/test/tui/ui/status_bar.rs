use super::{StatusContext, spans_display_width};
use crate::catalog::{CatalogLister, ConnectionError};
use crate::connection::ConnectionDescriptor;
use crate::export::{ExportError, Exporter};
use crate::tui::{Screen, Session, SessionConfig};
use ratatui::text::Span;
use std::sync::Arc;

struct EmptyCatalog;

impl CatalogLister for EmptyCatalog {
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

#[test]
fn calculates_span_width_using_unicode_display_width() {
    let spans = vec![Span::raw("a界"), Span::raw("x")];
    assert_eq!(spans_display_width(&spans), 4);
}

#[test]
fn status_context_follows_screen_and_search_mode() {
    let mut session = Session::new(SessionConfig::default(), Arc::new(EmptyCatalog), Arc::new(NoopExporter));
    assert_eq!(session.resolve_status_context(), StatusContext::Connection);

    session.screen = Screen::menu();
    assert_eq!(session.resolve_status_context(), StatusContext::Menu);

    session.screen = Screen::target_selection();
    assert_eq!(session.resolve_status_context(), StatusContext::Targets);

    session.screen = Screen::TargetSelection {
        search_mode: true,
        notice: None,
    };
    assert_eq!(session.resolve_status_context(), StatusContext::TargetSearch);
}
