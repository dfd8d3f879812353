pub mod stake;
pub mod transactions;
pub mod visualization;

pub use transactions::TransactionsView;
pub use visualization::VisualizationView;
