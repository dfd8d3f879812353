pub mod app;
pub mod graph;
pub mod views;
pub mod widgets;
