//! Interactions reported by views. Views only read `&AppState`; the app
//! applies these after the frame's panels are laid out.

use client_core::{Action, Route};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Dispatch(Action),
    SelectNode(Option<String>),
    Navigate(Route),
    Copy { what: &'static str, text: String },
    Toast(String),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Dispatch(action) => action.tag(),
            UiEvent::SelectNode(_) => "select_node",
            UiEvent::Navigate(_) => "navigate",
            UiEvent::Copy { .. } => "copy",
            UiEvent::Toast(_) => "toast",
        }
    }
}
