use serde::Serialize;
use shared::{domain::Validator, error::ApiError};

use crate::actions::{Action, RequestKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoreState {
    pub is_loading: bool,
    pub validators: Vec<Validator>,
    pub root_validator: Option<Validator>,
    pub error: Option<ApiError>,
}

impl CoreState {
    pub fn reduce(self, action: &Action) -> Self {
        match action {
            Action::GetValidators => Self {
                is_loading: true,
                ..self
            },
            Action::GetValidatorsSuccess { validators } => Self {
                is_loading: false,
                validators: validators.clone(),
                error: None,
                ..self
            },
            Action::SetRootValidator(validator) => Self {
                root_validator: validator.clone(),
                ..self
            },
            Action::RequestFailed {
                request: RequestKind::Validators,
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
