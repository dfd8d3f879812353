use serde::Serialize;
use shared::{domain::KeyPair, error::ApiError};

use crate::actions::{Action, RequestKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionsState {
    pub is_loading: bool,
    pub keys: Vec<KeyPair>,
    pub balance: String,
    pub stake: String,
    pub transaction_fee: String,
    pub error: Option<ApiError>,
}

impl Default for TransactionsState {
    fn default() -> Self {
        Self {
            is_loading: false,
            keys: Vec::new(),
            balance: String::new(),
            stake: String::new(),
            transaction_fee: "0".to_string(),
            error: None,
        }
    }
}

impl TransactionsState {
    pub fn reduce(self, action: &Action) -> Self {
        match action {
            Action::GetAgent { .. } | Action::MakeTransfer(_) | Action::GenerateKeyPair { .. } => {
                Self {
                    is_loading: true,
                    ..self
                }
            }
            Action::GetAgentSuccess(update) => Self {
                is_loading: false,
                keys: update.keys.clone(),
                balance: update.balance.clone(),
                stake: update.stake.clone(),
                transaction_fee: update
                    .transaction_fee
                    .clone()
                    .unwrap_or(self.transaction_fee),
                error: None,
            },
            Action::AddKeySuccess => Self { error: None, ..self },
            Action::RequestFailed { request, error } => match request {
                RequestKind::Agent | RequestKind::Transfer | RequestKind::GenerateKeyPair => Self {
                    is_loading: false,
                    error: Some(error.clone()),
                    ..self
                },
                RequestKind::AddKey => Self {
                    error: Some(error.clone()),
                    ..self
                },
                _ => self,
            },
            _ => self,
        }
    }
}
