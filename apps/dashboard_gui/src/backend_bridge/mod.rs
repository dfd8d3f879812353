//! Tokio runtime hosting effect tasks while eframe owns the main thread.

pub mod runtime;
