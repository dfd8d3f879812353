use serde::Serialize;
use shared::{
    domain::{Dag, RoundStatus, TransactionInfo},
    error::ApiError,
};

use crate::actions::{Action, RequestKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisualizationState {
    pub is_loading: bool,
    pub is_transaction_info_loading: bool,
    pub is_round_status_loading: bool,
    pub dag: Dag,
    /// Node the current `dag` was requested from.
    pub dag_port: Option<u16>,
    pub selected_node_id: Option<String>,
    pub transaction_info: Option<TransactionInfo>,
    pub round_status: RoundStatus,
    pub dag_error: Option<ApiError>,
    pub transaction_info_error: Option<ApiError>,
    pub round_status_error: Option<ApiError>,
}

impl VisualizationState {
    pub fn reduce(self, action: &Action) -> Self {
        match action {
            Action::GetDag { port } => Self {
                is_loading: true,
                dag_port: Some(*port),
                ..self
            },
            Action::GetDagSuccess { dag, round_status } => Self {
                is_loading: false,
                dag: dag.clone(),
                round_status: *round_status,
                dag_error: None,
                ..self
            },
            Action::SetSelectedNode(node_id) => {
                if *node_id == self.selected_node_id {
                    return self;
                }
                Self {
                    selected_node_id: node_id.clone(),
                    transaction_info: None,
                    is_transaction_info_loading: false,
                    transaction_info_error: None,
                    ..self
                }
            }
            Action::GetTransactionInfo { .. } => Self {
                is_transaction_info_loading: true,
                transaction_info_error: None,
                ..self
            },
            Action::GetTransactionInfoSuccess {
                transaction_id,
                transaction_info,
            } => {
                // A reply for a node that is no longer selected.
                if self.selected_node_id.as_ref() != Some(transaction_id) {
                    return self;
                }
                Self {
                    is_transaction_info_loading: false,
                    transaction_info: Some(transaction_info.clone()),
                    transaction_info_error: None,
                    ..self
                }
            }
            Action::GetCkptRoundStatus { .. } => Self {
                is_round_status_loading: true,
                ..self
            },
            Action::GetCkptRoundStatusSuccess { round_status } => Self {
                is_round_status_loading: false,
                round_status: *round_status,
                round_status_error: None,
                ..self
            },
            Action::RequestFailed { request, error } => match request {
                RequestKind::Dag => Self {
                    is_loading: false,
                    dag_error: Some(error.clone()),
                    ..self
                },
                RequestKind::TransactionInfo => Self {
                    is_transaction_info_loading: false,
                    transaction_info_error: Some(error.clone()),
                    ..self
                },
                RequestKind::RoundStatus => Self {
                    is_round_status_loading: false,
                    round_status_error: Some(error.clone()),
                    ..self
                },
                _ => self,
            },
            _ => self,
        }
    }
}
