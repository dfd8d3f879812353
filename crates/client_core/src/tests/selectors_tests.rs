use super::*;

use shared::domain::{NodeMeta, SymbolType};

use crate::actions::{Action, AgentUpdate};

fn wallet(key: &str, value: &str) -> Wallet {
    Wallet {
        public_key: key.to_string(),
        value: value.to_string(),
        origin: None,
    }
}

fn node(id: &str, meta: NodeMeta) -> Node {
    Node {
        id: id.to_string(),
        symbol_type: SymbolType::Square,
        label: None,
        color: None,
        meta,
    }
}

fn state_with(nodes: Vec<Node>, selected: &str) -> AppState {
    AppState::default()
        .reduce(&Action::GetDagSuccess {
            dag: Dag {
                nodes,
                links: Vec::new(),
            },
            round_status: RoundStatus::Unknown,
        })
        .reduce(&Action::SetSelectedNode(Some(selected.to_string())))
}

#[test]
fn confirmed_transaction_uses_totals_from_node() {
    let meta = NodeMeta {
        is_transaction: true,
        is_confirmed: true,
        total_inputs: Some("10".into()),
        total_outputs: Some("9".into()),
        total_fees: Some("1".into()),
        inputs: Some(vec![wallet("pk1", "10")]),
        ..NodeMeta::default()
    };
    let state = state_with(vec![node("t1", meta)], "t1");

    assert_eq!(needs_transaction_lookup(&state), None);
    let details = node_details(&state).expect("details");
    assert_eq!(details.title(), "Transaction Details");
    match details {
        NodeDetails::Transaction {
            total_inputs,
            total_outputs,
            total_fees,
            inputs,
            stake,
            confirmed,
            ..
        } => {
            assert_eq!(total_inputs, "10");
            assert_eq!(total_outputs, "9");
            assert_eq!(total_fees, "1");
            assert_eq!(inputs.len(), 1);
            assert_eq!(stake, None);
            assert!(confirmed);
        }
        other => panic!("unexpected details: {other:?}"),
    }
}

#[test]
fn unconfirmed_transaction_uses_fetched_info() {
    let meta = NodeMeta {
        is_transaction: true,
        total_inputs: Some("stale".into()),
        ..NodeMeta::default()
    };
    let state = state_with(vec![node("t2", meta)], "t2");
    assert_eq!(needs_transaction_lookup(&state), Some("t2"));

    let state = state.reduce(&Action::GetTransactionInfoSuccess {
        transaction_id: "t2".into(),
        transaction_info: TransactionInfo {
            total_inputs: "20".into(),
            total_outputs: "19".into(),
            total_fees: "NA".into(),
            stake: "7".into(),
            outputs: vec![wallet("pk2", "19")],
            ..TransactionInfo::default()
        },
    });

    match node_details(&state).expect("details") {
        NodeDetails::Transaction {
            total_inputs,
            total_fees,
            outputs,
            stake,
            confirmed,
            ..
        } => {
            assert_eq!(total_inputs, "20");
            assert_eq!(total_fees, "NA");
            assert_eq!(outputs.len(), 1);
            assert_eq!(stake.as_deref(), Some("7"));
            assert!(!confirmed);
        }
        other => panic!("unexpected details: {other:?}"),
    }
}

#[test]
fn checkpoint_details_render_lock_time_in_utc() {
    let meta = NodeMeta {
        is_transaction: true,
        is_checkpoint: true,
        miner: Some("pkm".into()),
        lock_time: Some("1600000000".into()),
        height: Some(12),
        nutxo: Some(3),
        total_stake: Some("900".into()),
        total_inputs: Some("30".into()),
        total_outputs: Some("2".into()),
        ..NodeMeta::default()
    };
    let state = state_with(vec![node("c1", meta)], "c1");

    assert_eq!(needs_transaction_lookup(&state), None);
    let details = node_details(&state).expect("details");
    assert_eq!(details.title(), "Checkpoint Details");
    assert_eq!(
        details,
        NodeDetails::Checkpoint {
            id: "c1".into(),
            miner: "pkm".into(),
            utc_time: Some("13 Sep 2020 12:26:40".into()),
            total_stake: "900".into(),
            height: Some(12),
            nutxo: Some(3),
            total_unspent_outputs: "30".into(),
            unspent_outputs: Vec::new(),
            fee_rewards: "2".into(),
            reward_outputs: Vec::new(),
        }
    );
}

#[test]
fn acknowledgement_defaults_missing_fields_to_unknown() {
    let meta = NodeMeta {
        txn_id: Some("t1".into()),
        ..NodeMeta::default()
    };
    let state = state_with(vec![node("a1", meta)], "a1");

    assert_eq!(needs_transaction_lookup(&state), None);
    assert_eq!(
        node_details(&state),
        Some(NodeDetails::Acknowledgement {
            id: "a1".into(),
            previous: "Unknown".into(),
            transaction: "t1".into(),
            validator: "Unknown".into(),
        })
    );
}

#[test]
fn selection_of_a_missing_node_yields_nothing() {
    let state = state_with(Vec::new(), "ghost");
    assert!(selected_node(&state).is_none());
    assert!(node_details(&state).is_none());
}

#[test]
fn balance_and_fee_parse_formatted_amounts() {
    let state = AppState::default().reduce(&Action::GetAgentSuccess(AgentUpdate {
        balance: "1,234.5".into(),
        keys: Vec::new(),
        stake: "0".into(),
        transaction_fee: Some("0.010000".into()),
    }));
    assert_eq!(balance(&state), 1234.5);
    assert_eq!(transaction_fee(&state), 0.01);
    assert!(current_key_pair(&state).is_none());
}

#[test]
fn current_key_pair_is_the_last_one() {
    let keys = vec![
        KeyPair {
            public_key: "old".into(),
            secret_key: "s1".into(),
        },
        KeyPair {
            public_key: "new".into(),
            secret_key: "s2".into(),
        },
    ];
    let state = AppState::default().reduce(&Action::GetAgentSuccess(AgentUpdate {
        balance: "0".into(),
        keys,
        stake: "0".into(),
        transaction_fee: None,
    }));
    assert_eq!(
        current_key_pair(&state).map(|k| k.public_key.as_str()),
        Some("new")
    );
}

#[test]
fn round_status_label_reads_in_progress() {
    let state = AppState::default();
    assert_eq!(round_status_label(&state), "Unknown");

    let state = state.reduce(&Action::GetCkptRoundStatusSuccess {
        round_status: RoundStatus::AgreeContent,
    });
    assert_eq!(round_status_label(&state), "AGREE_CONTENT in progress");
}

#[test]
fn root_validator_falls_back_to_first_configured() {
    let alpha = Validator {
        agent_name: "alpha".into(),
        agent_ip: "10.0.0.1".into(),
    };
    let beta = Validator {
        agent_name: "beta".into(),
        agent_ip: "10.0.0.2".into(),
    };
    let state = AppState::default().reduce(&Action::GetValidatorsSuccess {
        validators: vec![alpha.clone(), beta.clone()],
    });
    assert_eq!(root_validator(&state), Some(&alpha));

    let state = state.reduce(&Action::SetRootValidator(Some(beta.clone())));
    assert_eq!(root_validator(&state), Some(&beta));
}
