//! Effect handlers: one task per dispatched request action.
//!
//! A handler performs the ledger call and sends its result actions back
//! through the store's [`ActionSender`]. Failures become
//! [`Action::RequestFailed`] so the owning slice leaves its loading state.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use shared::domain::Validator;
use tokio::{runtime::Handle, sync::broadcast, task::JoinHandle};
use tracing::{info, warn};

use crate::{
    actions::{Action, AgentUpdate, RequestKind, TransferOrder},
    error::ClientError,
    format::{format_fee, format_number},
    store::ActionSender,
    LedgerApi,
};

/// A short user-facing confirmation, shown as a toast by the GUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Mutating requests are de-duplicated on their full payload while in
/// flight. Reads are allowed to race.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum InflightKey {
    Transfer(TransferOrder),
    GenerateKeyPair(u16),
    AddKey(u16, String),
}

impl InflightKey {
    fn for_action(action: &Action) -> Option<Self> {
        match action {
            Action::MakeTransfer(order) => Some(InflightKey::Transfer(order.clone())),
            Action::GenerateKeyPair { port } => Some(InflightKey::GenerateKeyPair(*port)),
            Action::AddKey { port, key } => Some(InflightKey::AddKey(*port, key.clone())),
            _ => None,
        }
    }
}

type InflightSet = Arc<Mutex<HashSet<InflightKey>>>;

struct InflightGuard {
    key: Option<InflightKey>,
    set: InflightSet,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            let mut set = self.set.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            set.remove(&key);
        }
    }
}

pub struct Effects {
    api: Arc<dyn LedgerApi>,
    runtime: Handle,
    validators: Arc<Vec<Validator>>,
    notices: broadcast::Sender<Notice>,
    inflight: InflightSet,
}

impl Effects {
    pub fn new(api: Arc<dyn LedgerApi>, runtime: Handle) -> Self {
        let (notices, _) = broadcast::channel(64);
        Self {
            api,
            runtime,
            validators: Arc::new(Vec::new()),
            notices,
            inflight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Validators offered in the toolbar. They are configured locally, so
    /// `GetValidators` resolves without touching the network.
    pub fn with_validators(mut self, validators: Vec<Validator>) -> Self {
        self.validators = Arc::new(validators);
        self
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Spawns the handler for `action` if it is a request. Returns `None` for
    /// state actions and for suppressed duplicates.
    pub fn run(&self, action: &Action, tx: &ActionSender) -> Option<JoinHandle<()>> {
        let kind = action.request_kind()?;
        let guard = self.claim(action)?;

        let api = Arc::clone(&self.api);
        let notices = self.notices.clone();
        let validators = Arc::clone(&self.validators);
        let action = action.clone();
        let tx = tx.clone();

        Some(self.runtime.spawn(async move {
            let _guard = guard;
            match handle(api.as_ref(), &notices, &validators, action).await {
                Ok(results) => {
                    info!(request = kind.as_str(), "request completed");
                    for result in results {
                        let _ = tx.send(result);
                    }
                }
                Err(err) => {
                    warn!(request = kind.as_str(), error = %err, "request failed");
                    let _ = tx.send(Action::RequestFailed {
                        request: kind,
                        error: err.to_api_error(),
                    });
                }
            }
        }))
    }

    fn claim(&self, action: &Action) -> Option<InflightGuard> {
        let Some(key) = InflightKey::for_action(action) else {
            return Some(InflightGuard {
                key: None,
                set: Arc::clone(&self.inflight),
            });
        };

        let mut set = self
            .inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !set.insert(key.clone()) {
            warn!(tag = action.tag(), "identical request already in flight; dropping");
            return None;
        }
        Some(InflightGuard {
            key: Some(key),
            set: Arc::clone(&self.inflight),
        })
    }
}

async fn handle(
    api: &dyn LedgerApi,
    notices: &broadcast::Sender<Notice>,
    validators: &[Validator],
    action: Action,
) -> Result<Vec<Action>, ClientError> {
    match action {
        Action::GetValidators => Ok(vec![Action::GetValidatorsSuccess {
            validators: validators.to_vec(),
        }]),
        Action::GetAgent { port } => {
            let response = api.agent(port).await?;
            let fee = format_fee(&response.transaction_fee).ok_or_else(|| {
                ClientError::Malformed {
                    field: "transaction_fee",
                    value: response.transaction_fee.clone(),
                }
            })?;
            // The initial fetch keeps the balance as the node reports it.
            Ok(vec![Action::GetAgentSuccess(AgentUpdate {
                balance: response.agent.balance,
                keys: response.agent.keys,
                stake: format_number(&response.agent.stake),
                transaction_fee: Some(fee),
            })])
        }
        Action::MakeTransfer(order) => {
            let response = api.transfer(order.port, &order.to_request()).await?;
            let _ = notices.send(Notice::new("Transaction has been submitted!"));
            Ok(vec![Action::GetAgentSuccess(formatted_update(
                response.agent.balance,
                response.agent.keys,
                response.agent.stake,
            ))])
        }
        Action::GenerateKeyPair { port } => {
            let agent = api.generate_key_pair(port).await?;
            let _ = notices.send(Notice::new("Key pair generated!"));
            Ok(vec![Action::GetAgentSuccess(formatted_update(
                agent.balance,
                agent.keys,
                agent.stake,
            ))])
        }
        Action::AddKey { port, key } => {
            let response = api.add_key(port, &key).await?;
            info!(port, status = %response.status, "key added");
            let _ = notices.send(Notice::new("Added new key!"));
            Ok(vec![Action::AddKeySuccess, Action::GetAgent { port }])
        }
        Action::GetDag { port } => {
            let response = api.dag(port).await?;
            Ok(vec![Action::GetDagSuccess {
                dag: response.dag,
                round_status: response.round_status,
            }])
        }
        Action::GetTransactionInfo {
            port,
            transaction_id,
        } => {
            let transaction_info = api.transaction_info(port, &transaction_id).await?;
            Ok(vec![Action::GetTransactionInfoSuccess {
                transaction_id,
                transaction_info,
            }])
        }
        Action::GetCkptRoundStatus { port } => {
            let response = api.round_status(port).await?;
            Ok(vec![Action::GetCkptRoundStatusSuccess {
                round_status: response.round_status,
            }])
        }
        Action::GetStakeDist { port } => {
            let stake_dist = api.stake_dist(port).await?;
            Ok(vec![Action::GetStakeDistSuccess { stake_dist }])
        }
        _ => Ok(Vec::new()),
    }
}

fn formatted_update(
    balance: String,
    keys: Vec<shared::domain::KeyPair>,
    stake: String,
) -> AgentUpdate {
    AgentUpdate {
        balance: format_number(&balance),
        keys,
        stake: format_number(&stake),
        transaction_fee: None,
    }
}

#[cfg(test)]
#[path = "tests/effects_tests.rs"]
mod tests;
