use serde::Serialize;
use shared::{domain::StakeDistEntry, error::ApiError};

use crate::actions::{Action, RequestKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StakeState {
    pub is_loading: bool,
    pub stake_dist: Vec<StakeDistEntry>,
    pub error: Option<ApiError>,
}

impl StakeState {
    pub fn reduce(self, action: &Action) -> Self {
        match action {
            Action::GetStakeDist { .. } => Self {
                is_loading: true,
                ..self
            },
            Action::GetStakeDistSuccess { stake_dist } => Self {
                is_loading: false,
                stake_dist: stake_dist.clone(),
                error: None,
            },
            Action::RequestFailed {
                request: RequestKind::StakeDist,
                error,
            } => Self {
                is_loading: false,
                error: Some(error.clone()),
                ..self
            },
            _ => self,
        }
    }
}
