use serde::{Deserialize, Serialize};

use crate::domain::{string_or_number, Dag, KeyPair, RoundStatus, TransferMode};

/// Account view of a node as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    #[serde(deserialize_with = "string_or_number")]
    pub balance: String,
    #[serde(default)]
    pub keys: Vec<KeyPair>,
    #[serde(deserialize_with = "string_or_number")]
    pub stake: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub agent: AgentSnapshot,
    #[serde(deserialize_with = "string_or_number")]
    pub transaction_fee: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub value: String,
    pub recipient: String,
    pub mode: TransferMode,
    pub validator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResponse {
    pub agent: AgentSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddKeyRequest {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddKeyResponse {
    #[serde(default)]
    pub status: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DagResponse {
    #[serde(default)]
    pub dag: Dag,
    #[serde(default)]
    pub round_status: RoundStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoundStatusResponse {
    #[serde(default)]
    pub round_status: RoundStatus,
}
