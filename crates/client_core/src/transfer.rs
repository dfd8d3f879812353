//! Transfer form: per-field validation on blur and the submit decision.

use shared::domain::TransferMode;

use crate::actions::{Action, TransferOrder};

pub const PUBLIC_KEY_HEX_LEN: usize = 64;

pub fn is_valid_hex(value: &str) -> bool {
    value.len() == PUBLIC_KEY_HEX_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn validate_value(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Transaction value cannot be empty!".to_string());
    }
    match value.parse::<f64>() {
        Ok(parsed) if parsed == 0.0 => Err("Transaction value cannot be 0!".to_string()),
        Ok(parsed) if parsed.is_finite() => Ok(()),
        _ => Err("Transaction value is not a number!".to_string()),
    }
}

pub fn validate_recipient(recipient: &str) -> Result<(), String> {
    if recipient.is_empty() {
        Err("Recipient's public key cannot be empty!".to_string())
    } else if !is_valid_hex(recipient) {
        Err("Recipient's public key is not valid!".to_string())
    } else {
        Ok(())
    }
}

pub fn validate_validator(mode: TransferMode, validator: &str) -> Result<(), String> {
    if mode == TransferMode::Delegate && validator.is_empty() {
        Err("Validator cannot be empty!".to_string())
    } else if !is_valid_hex(validator) {
        Err("Validator key is not valid!".to_string())
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Pristine,
    Valid,
    Invalid(String),
}

impl FieldState {
    fn from_result(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => FieldState::Valid,
            Err(message) => FieldState::Invalid(message),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FieldState::Valid)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FieldState::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransferForm {
    pub mode: TransferMode,
    pub value: String,
    pub recipient: String,
    pub validator: String,
    pub value_state: FieldState,
    pub recipient_state: FieldState,
    pub validator_state: FieldState,
}

impl TransferForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form opened from a `/transactions/:value/:recipient` link. Prefilled
    /// fields are validated right away.
    pub fn prefilled(value: Option<&str>, recipient: Option<&str>) -> Self {
        let mut form = Self::new();
        if let Some(value) = value {
            form.set_value(value);
            form.blur_value();
        }
        if let Some(recipient) = recipient {
            form.recipient = recipient.to_string();
            form.blur_recipient();
        }
        form
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = match value.trim().parse::<f64>() {
            Ok(parsed) if parsed < 0.0 => "0".to_string(),
            _ => value.to_string(),
        };
    }

    pub fn set_mode(&mut self, mode: TransferMode) {
        self.mode = mode;
    }

    pub fn blur_value(&mut self) {
        self.value_state = FieldState::from_result(validate_value(&self.value));
    }

    pub fn blur_recipient(&mut self) {
        self.recipient_state = FieldState::from_result(validate_recipient(&self.recipient));
    }

    pub fn blur_validator(&mut self) {
        self.validator_state =
            FieldState::from_result(validate_validator(self.mode, &self.validator));
    }

    pub fn can_submit(&self) -> bool {
        let recipient_ready = self.value_state.is_valid() && self.recipient_state.is_valid();
        match self.mode {
            TransferMode::Recipient => recipient_ready,
            TransferMode::Delegate => recipient_ready && self.validator_state.is_valid(),
        }
    }

    /// Value plus the fee charged on it.
    pub fn total_cost(&self, fee_rate: f64) -> f64 {
        let value = self.value.trim().parse::<f64>().unwrap_or(0.0);
        value + value * fee_rate
    }

    pub fn submit(&self, balance: f64, fee_rate: f64, port: u16) -> TransferDialog {
        if !self.can_submit() {
            return TransferDialog::Closed;
        }
        if self.total_cost(fee_rate) > balance {
            return TransferDialog::InsufficientBalance;
        }
        TransferDialog::Confirm(TransferOrder {
            port,
            value: self.value.trim().to_string(),
            recipient: self.recipient.clone(),
            mode: self.mode,
            validator: self.validator.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransferDialog {
    #[default]
    Closed,
    InsufficientBalance,
    Confirm(TransferOrder),
}

impl TransferDialog {
    pub fn title(&self) -> &'static str {
        match self {
            TransferDialog::Closed => "",
            TransferDialog::InsufficientBalance => "Balance",
            TransferDialog::Confirm(_) => "Confirm",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            TransferDialog::Closed => "",
            TransferDialog::InsufficientBalance => "You have insufficient balance!",
            TransferDialog::Confirm(_) => "Are you sure you want to make the transfer?",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, TransferDialog::Closed)
    }

    /// Explicit agreement. Only a confirmation dialog yields a transfer.
    pub fn confirm(self) -> Option<Action> {
        match self {
            TransferDialog::Confirm(order) => Some(Action::MakeTransfer(order)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/transfer_tests.rs"]
mod tests;
