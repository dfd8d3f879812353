use serde::{Deserialize, Deserializer, Serialize};

/// Accepts a JSON string or number and keeps its textual form. The ledger
/// backend is inconsistent about which of the two it sends for amounts.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Validator {
    #[serde(rename = "agentName")]
    pub agent_name: String,
    #[serde(rename = "agentIp")]
    pub agent_ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub public_key: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    #[default]
    Recipient,
    Delegate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolType {
    #[default]
    Square,
    Circle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub public_key: String,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeMeta {
    #[serde(rename = "isTransaction", default)]
    pub is_transaction: bool,
    #[serde(rename = "isCheckpoint", default)]
    pub is_checkpoint: bool,
    #[serde(rename = "isConfirmed", default)]
    pub is_confirmed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_inputs: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_outputs: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_fees: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<Wallet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Wallet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_ack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txn_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miner: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub lock_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutxo: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack_length: Option<u64>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_stake: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "symbolType", default)]
    pub symbol_type: SymbolType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub meta: NodeMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dag {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Dag {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Detail for a transaction the node has not confirmed yet. Every field
/// defaults because the backend answers `{}` for unknown ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionInfo {
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_inputs: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_outputs: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_fees: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub stake: String,
    #[serde(default)]
    pub inputs: Vec<Wallet>,
    #[serde(default)]
    pub outputs: Vec<Wallet>,
    #[serde(default)]
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeDistEntry {
    pub public_key: String,
    #[serde(deserialize_with = "string_or_number")]
    pub stake_t: String,
    #[serde(deserialize_with = "string_or_number")]
    pub stake_p: String,
}

/// Checkpoint consensus phase as reported by `round_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum RoundStatus {
    #[default]
    Unknown,
    AgreeValidator,
    AgreeHash,
    AgreeContent,
}

impl RoundStatus {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => RoundStatus::AgreeValidator,
            2 => RoundStatus::AgreeHash,
            3 => RoundStatus::AgreeContent,
            _ => RoundStatus::Unknown,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            RoundStatus::Unknown => 0,
            RoundStatus::AgreeValidator => 1,
            RoundStatus::AgreeHash => 2,
            RoundStatus::AgreeContent => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoundStatus::Unknown => "Unknown",
            RoundStatus::AgreeValidator => "AGREE_VALIDATOR",
            RoundStatus::AgreeHash => "AGREE_HASH",
            RoundStatus::AgreeContent => "AGREE_CONTENT",
        }
    }

    pub fn is_known(self) -> bool {
        self != RoundStatus::Unknown
    }
}

impl From<u8> for RoundStatus {
    fn from(code: u8) -> Self {
        RoundStatus::from_code(code)
    }
}

impl From<RoundStatus> for u8 {
    fn from(status: RoundStatus) -> Self {
        status.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_status_labels_follow_codes() {
        assert_eq!(RoundStatus::from_code(0).label(), "Unknown");
        assert_eq!(RoundStatus::from_code(1).label(), "AGREE_VALIDATOR");
        assert_eq!(RoundStatus::from_code(2).label(), "AGREE_HASH");
        assert_eq!(RoundStatus::from_code(3).label(), "AGREE_CONTENT");
        assert_eq!(RoundStatus::from_code(9), RoundStatus::Unknown);
    }

    #[test]
    fn node_meta_accepts_numeric_and_textual_amounts() {
        let node: Node = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "symbolType": "square",
            "meta": {
                "isTransaction": true,
                "isConfirmed": true,
                "total_inputs": "10.5",
                "total_outputs": 10,
                "total_fees": "NA"
            }
        }))
        .expect("node");

        assert_eq!(node.meta.total_inputs.as_deref(), Some("10.5"));
        assert_eq!(node.meta.total_outputs.as_deref(), Some("10"));
        assert_eq!(node.meta.total_fees.as_deref(), Some("NA"));
        assert!(!node.meta.is_checkpoint);
    }

    #[test]
    fn empty_transaction_info_object_decodes_to_default() {
        let info: TransactionInfo = serde_json::from_str("{}").expect("info");
        assert_eq!(info, TransactionInfo::default());
    }

    #[test]
    fn validator_uses_camel_case_wire_names() {
        let validator: Validator =
            serde_json::from_str(r#"{"agentName":"alpha","agentIp":"10.0.0.1"}"#).expect("v");
        assert_eq!(validator.agent_name, "alpha");
        assert_eq!(validator.agent_ip, "10.0.0.1");
    }
}
