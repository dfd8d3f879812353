//! Page-entry requests and routing of view events into the store.

use client_core::{selectors, Action, AppState, Route, Store};

use crate::controller::events::UiEvent;

/// Requests issued once at start-up, independent of the page.
pub fn startup_actions() -> Vec<Action> {
    vec![Action::GetValidators]
}

/// Requests issued when a page is entered. The graph is only fetched when
/// none is loaded yet or it belongs to another node; the reload button
/// refetches explicitly.
pub fn entry_actions(route: &Route, state: &AppState) -> Vec<Action> {
    match route {
        Route::Visualization { port } => {
            let current = selectors::dag_port(state) == Some(*port);
            if current && !selectors::dag(state).is_empty() {
                Vec::new()
            } else {
                vec![Action::GetDag { port: *port }]
            }
        }
        Route::Transactions { port, .. } => vec![Action::GetAgent { port: *port }],
        Route::Stake { port } => vec![Action::GetStakeDist { port: *port }],
    }
}

/// Applies store-bound events and hands the rest back to the app shell.
pub fn dispatch_ui_event(store: &mut Store, port: u16, event: UiEvent) -> Option<UiEvent> {
    tracing::debug!(event = event.name(), "ui event");
    match event {
        UiEvent::Dispatch(action) => {
            store.dispatch(action);
            None
        }
        UiEvent::SelectNode(node_id) => {
            store.select_node(port, node_id);
            None
        }
        other => Some(other),
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
