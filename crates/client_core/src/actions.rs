//! Intents flowing through the store.
//!
//! Request variants (`@@saga/...`) are picked up by [`crate::effects::Effects`];
//! result variants (`@@state/...`) only touch reducers. Payload shape is not
//! validated here.

use serde::Serialize;
use shared::{
    domain::{Dag, KeyPair, RoundStatus, StakeDistEntry, TransactionInfo, TransferMode, Validator},
    error::ApiError,
    protocol::TransferRequest,
};

/// A transfer the user confirmed, addressed to the node listening on `port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TransferOrder {
    pub port: u16,
    pub value: String,
    pub recipient: String,
    pub mode: TransferMode,
    pub validator: String,
}

impl TransferOrder {
    pub fn to_request(&self) -> TransferRequest {
        TransferRequest {
            value: self.value.clone(),
            recipient: self.recipient.clone(),
            mode: self.mode,
            validator: self.validator.clone(),
        }
    }
}

/// Fields merged into the transactions slice on a fresh agent snapshot.
/// `transaction_fee` is only reported by the `agent` route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentUpdate {
    pub balance: String,
    pub keys: Vec<KeyPair>,
    pub stake: String,
    pub transaction_fee: Option<String>,
}

/// Which request a failure belongs to, so the matching slice leaves loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Validators,
    Agent,
    GenerateKeyPair,
    AddKey,
    Transfer,
    Dag,
    TransactionInfo,
    RoundStatus,
    StakeDist,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Validators => "validators",
            RequestKind::Agent => "agent",
            RequestKind::GenerateKeyPair => "generate_key_pair",
            RequestKind::AddKey => "add_key",
            RequestKind::Transfer => "transfer",
            RequestKind::Dag => "dag",
            RequestKind::TransactionInfo => "transaction_info",
            RequestKind::RoundStatus => "round_status",
            RequestKind::StakeDist => "stake_dist",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    GetValidators,
    GetAgent { port: u16 },
    GenerateKeyPair { port: u16 },
    AddKey { port: u16, key: String },
    MakeTransfer(TransferOrder),
    GetDag { port: u16 },
    GetTransactionInfo { port: u16, transaction_id: String },
    GetCkptRoundStatus { port: u16 },
    GetStakeDist { port: u16 },

    GetValidatorsSuccess { validators: Vec<Validator> },
    SetRootValidator(Option<Validator>),
    GetAgentSuccess(AgentUpdate),
    AddKeySuccess,
    GetDagSuccess { dag: Dag, round_status: RoundStatus },
    SetSelectedNode(Option<String>),
    GetTransactionInfoSuccess {
        transaction_id: String,
        transaction_info: TransactionInfo,
    },
    GetCkptRoundStatusSuccess { round_status: RoundStatus },
    GetStakeDistSuccess { stake_dist: Vec<StakeDistEntry> },
    RequestFailed { request: RequestKind, error: ApiError },
}

impl Action {
    pub fn tag(&self) -> &'static str {
        match self {
            Action::GetValidators => "@@saga/GET_VALIDATORS",
            Action::GetAgent { .. } => "@@saga/GET_AGENT",
            Action::GenerateKeyPair { .. } => "@@saga/GENERATE_KEY_PAIR",
            Action::AddKey { .. } => "@@saga/ADD_KEY",
            Action::MakeTransfer(_) => "@@saga/MAKE_TRANSFER",
            Action::GetDag { .. } => "@@saga/GET_DAG",
            Action::GetTransactionInfo { .. } => "@@saga/GET_TRANSACTION_INFO",
            Action::GetCkptRoundStatus { .. } => "@@saga/GET_CKPT_ROUND_STATUS",
            Action::GetStakeDist { .. } => "@@saga/GET_STAKE_DIST",
            Action::GetValidatorsSuccess { .. } => "@@state/GET_VALIDATORS_SUCCESS",
            Action::SetRootValidator(_) => "@@state/SET_ROOT_VALIDATOR",
            Action::GetAgentSuccess(_) => "@@state/GET_AGENT_SUCCESS",
            Action::AddKeySuccess => "@@state/ADD_KEY_SUCCESS",
            Action::GetDagSuccess { .. } => "@@state/GET_DAG_SUCCESS",
            Action::SetSelectedNode(_) => "@@state/SET_SELECTED_NODE",
            Action::GetTransactionInfoSuccess { .. } => "@@state/GET_TRANSACTION_INFO_SUCCESS",
            Action::GetCkptRoundStatusSuccess { .. } => "@@state/GET_CKPT_ROUND_STATUS_SUCCESS",
            Action::GetStakeDistSuccess { .. } => "@@state/GET_STAKE_DIST_SUCCESS",
            Action::RequestFailed { .. } => "@@state/REQUEST_FAILED",
        }
    }

    /// The request kind for `@@saga/` actions, `None` for state actions.
    pub fn request_kind(&self) -> Option<RequestKind> {
        let kind = match self {
            Action::GetValidators => RequestKind::Validators,
            Action::GetAgent { .. } => RequestKind::Agent,
            Action::GenerateKeyPair { .. } => RequestKind::GenerateKeyPair,
            Action::AddKey { .. } => RequestKind::AddKey,
            Action::MakeTransfer(_) => RequestKind::Transfer,
            Action::GetDag { .. } => RequestKind::Dag,
            Action::GetTransactionInfo { .. } => RequestKind::TransactionInfo,
            Action::GetCkptRoundStatus { .. } => RequestKind::RoundStatus,
            Action::GetStakeDist { .. } => RequestKind::StakeDist,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_request(&self) -> bool {
        self.request_kind().is_some()
    }
}
