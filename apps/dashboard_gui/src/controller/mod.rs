//! Controller layer: view events, page-entry orchestration and toasts.

pub mod events;
pub mod orchestration;
pub mod toasts;
