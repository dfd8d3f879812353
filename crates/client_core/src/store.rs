use tokio::sync::mpsc;
use tracing::debug;

use crate::{actions::Action, effects::Effects, selectors, state::AppState};

/// Effect tasks send their result actions back through this.
pub type ActionSender = mpsc::UnboundedSender<Action>;

/// Owns the state tree. Reducers run synchronously inside [`Store::dispatch`];
/// results of spawned effects are queued until [`Store::drain`] or
/// [`Store::next`] applies them.
pub struct Store {
    state: AppState,
    effects: Option<Effects>,
    tx: ActionSender,
    rx: mpsc::UnboundedReceiver<Action>,
}

impl Store {
    /// A store that only reduces. Request actions toggle loading flags and
    /// nothing else.
    pub fn detached() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            effects: None,
            tx,
            rx,
        }
    }

    pub fn with_effects(effects: Effects) -> Self {
        Self {
            effects: Some(effects),
            ..Self::detached()
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn effects(&self) -> Option<&Effects> {
        self.effects.as_ref()
    }

    pub fn sender(&self) -> ActionSender {
        self.tx.clone()
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(tag = action.tag(), "dispatch");
        self.state = std::mem::take(&mut self.state).reduce(&action);
        if let Some(effects) = &self.effects {
            if action.is_request() {
                effects.run(&action, &self.tx);
            }
        }
    }

    /// Selecting an unconfirmed transaction also fetches its detail.
    pub fn select_node(&mut self, port: u16, node_id: Option<String>) {
        self.dispatch(Action::SetSelectedNode(node_id));
        if let Some(transaction_id) = selectors::needs_transaction_lookup(&self.state) {
            let transaction_id = transaction_id.to_string();
            self.dispatch(Action::GetTransactionInfo {
                port,
                transaction_id,
            });
        }
    }

    /// Applies every queued result without waiting. Returns how many were
    /// applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Waits for one queued action and applies it.
    pub async fn next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Applies queued actions until `done` holds for the state.
    pub async fn run_until(&mut self, mut done: impl FnMut(&AppState) -> bool) {
        while !done(&self.state) {
            if !self.next().await {
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
