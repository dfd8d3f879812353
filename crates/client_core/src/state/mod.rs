//! The state tree and its reducers. Every slice is reduced independently and
//! only `Store::dispatch` calls into here.

mod core;
mod stake;
mod transactions;
mod visualization;

pub use self::core::CoreState;
pub use stake::StakeState;
pub use transactions::TransactionsState;
pub use visualization::VisualizationState;

use serde::Serialize;

use crate::actions::Action;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub core: CoreState,
    pub transactions: TransactionsState,
    pub visualization: VisualizationState,
    pub stake: StakeState,
}

impl AppState {
    pub fn reduce(self, action: &Action) -> Self {
        Self {
            core: self.core.reduce(action),
            transactions: self.transactions.reduce(action),
            visualization: self.visualization.reduce(action),
            stake: self.stake.reduce(action),
        }
    }
}

#[cfg(test)]
#[path = "../tests/state_tests.rs"]
mod tests;
