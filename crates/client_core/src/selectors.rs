//! Read-only projections of [`AppState`]. Views and the CLI read through
//! these instead of reaching into slices.

use serde::Serialize;
use shared::domain::{
    Dag, KeyPair, Node, RoundStatus, StakeDistEntry, TransactionInfo, Validator, Wallet,
};

use crate::{
    format::{parse_amount, timestamp_to_utc},
    state::AppState,
};

pub fn validators(state: &AppState) -> &[Validator] {
    &state.core.validators
}

/// The chosen validator, or the first configured one.
pub fn root_validator(state: &AppState) -> Option<&Validator> {
    state
        .core
        .root_validator
        .as_ref()
        .or_else(|| state.core.validators.first())
}

pub fn transactions_loading(state: &AppState) -> bool {
    state.transactions.is_loading
}

/// Balance as a number. Thousands separators are ignored.
pub fn balance(state: &AppState) -> f64 {
    parse_amount(&state.transactions.balance)
}

pub fn keys(state: &AppState) -> &[KeyPair] {
    &state.transactions.keys
}

pub fn current_key_pair(state: &AppState) -> Option<&KeyPair> {
    state.transactions.keys.last()
}

pub fn transaction_fee(state: &AppState) -> f64 {
    parse_amount(&state.transactions.transaction_fee)
}

pub fn viz_loading(state: &AppState) -> bool {
    state.visualization.is_loading
}

pub fn dag(state: &AppState) -> &Dag {
    &state.visualization.dag
}

pub fn dag_port(state: &AppState) -> Option<u16> {
    state.visualization.dag_port
}

pub fn selected_node_id(state: &AppState) -> Option<&str> {
    state.visualization.selected_node_id.as_deref()
}

pub fn selected_node(state: &AppState) -> Option<&Node> {
    selected_node_id(state).and_then(|id| state.visualization.dag.node(id))
}

pub fn transaction_info(state: &AppState) -> Option<&TransactionInfo> {
    state.visualization.transaction_info.as_ref()
}

pub fn round_status(state: &AppState) -> RoundStatus {
    state.visualization.round_status
}

/// `"<STATUS> in progress"` while a round runs, `"Unknown"` otherwise.
pub fn round_status_label(state: &AppState) -> String {
    let status = round_status(state);
    if status.is_known() {
        format!("{} in progress", status.label())
    } else {
        status.label().to_string()
    }
}

pub fn stake_loading(state: &AppState) -> bool {
    state.stake.is_loading
}

pub fn stake_dist(state: &AppState) -> &[StakeDistEntry] {
    &state.stake.stake_dist
}

/// Id of the selected node when its detail has to come from the
/// `transaction` route: an unconfirmed transaction that is not a checkpoint.
pub fn needs_transaction_lookup(state: &AppState) -> Option<&str> {
    let node = selected_node(state)?;
    let meta = &node.meta;
    if meta.is_transaction && !meta.is_checkpoint && !meta.is_confirmed {
        Some(&node.id)
    } else {
        None
    }
}

/// What the node details dialog shows for the selected node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDetails {
    Transaction {
        id: String,
        total_inputs: String,
        inputs: Vec<Wallet>,
        total_outputs: String,
        outputs: Vec<Wallet>,
        total_fees: String,
        /// Only known for pending transactions.
        stake: Option<String>,
        confirmed: bool,
    },
    Checkpoint {
        id: String,
        miner: String,
        utc_time: Option<String>,
        total_stake: String,
        height: Option<u64>,
        nutxo: Option<u64>,
        total_unspent_outputs: String,
        unspent_outputs: Vec<Wallet>,
        fee_rewards: String,
        reward_outputs: Vec<Wallet>,
    },
    Acknowledgement {
        id: String,
        previous: String,
        transaction: String,
        validator: String,
    },
}

impl NodeDetails {
    pub fn title(&self) -> &'static str {
        match self {
            NodeDetails::Transaction { .. } => "Transaction Details",
            NodeDetails::Checkpoint { .. } => "Checkpoint Details",
            NodeDetails::Acknowledgement { .. } => "Ack Details",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            NodeDetails::Transaction { id, .. }
            | NodeDetails::Checkpoint { id, .. }
            | NodeDetails::Acknowledgement { id, .. } => id,
        }
    }
}

pub fn node_details(state: &AppState) -> Option<NodeDetails> {
    let node = selected_node(state)?;
    let meta = &node.meta;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let wallets = |value: &Option<Vec<Wallet>>| value.clone().unwrap_or_default();

    if meta.is_checkpoint {
        return Some(NodeDetails::Checkpoint {
            id: node.id.clone(),
            miner: text(&meta.miner),
            utc_time: meta
                .lock_time
                .as_deref()
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .and_then(timestamp_to_utc),
            total_stake: text(&meta.total_stake),
            height: meta.height,
            nutxo: meta.nutxo,
            total_unspent_outputs: text(&meta.total_inputs),
            unspent_outputs: wallets(&meta.inputs),
            fee_rewards: text(&meta.total_outputs),
            reward_outputs: wallets(&meta.outputs),
        });
    }

    if !meta.is_transaction {
        let or_unknown =
            |value: &Option<String>| value.clone().unwrap_or_else(|| "Unknown".to_string());
        return Some(NodeDetails::Acknowledgement {
            id: node.id.clone(),
            previous: or_unknown(&meta.prev_ack),
            transaction: or_unknown(&meta.txn_id),
            validator: or_unknown(&meta.validator),
        });
    }

    if meta.is_confirmed {
        return Some(NodeDetails::Transaction {
            id: node.id.clone(),
            total_inputs: text(&meta.total_inputs),
            inputs: wallets(&meta.inputs),
            total_outputs: text(&meta.total_outputs),
            outputs: wallets(&meta.outputs),
            total_fees: text(&meta.total_fees),
            stake: None,
            confirmed: true,
        });
    }

    let info = transaction_info(state).cloned().unwrap_or_default();
    Some(NodeDetails::Transaction {
        id: node.id.clone(),
        total_inputs: info.total_inputs,
        inputs: info.inputs,
        total_outputs: info.total_outputs,
        outputs: info.outputs,
        total_fees: info.total_fees,
        stake: Some(info.stake),
        confirmed: false,
    })
}

#[cfg(test)]
#[path = "tests/selectors_tests.rs"]
mod tests;
