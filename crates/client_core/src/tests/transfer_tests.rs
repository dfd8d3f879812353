use super::*;

fn key(ch: char) -> String {
    std::iter::repeat(ch).take(PUBLIC_KEY_HEX_LEN).collect()
}

fn valid_form(value: &str) -> TransferForm {
    let mut form = TransferForm::new();
    form.set_value(value);
    form.blur_value();
    form.recipient = key('a');
    form.blur_recipient();
    form
}

#[test]
fn hex_predicate_requires_exactly_64_hex_chars() {
    assert!(is_valid_hex(&key('f')));
    assert!(is_valid_hex(&"0123456789abcdefABCDEF".repeat(3)[..64]));
    assert!(!is_valid_hex(&key('a')[..63]));
    assert!(!is_valid_hex(&format!("{}g", &key('a')[..63])));
    assert!(!is_valid_hex(&key('a').repeat(2)));
    assert!(!is_valid_hex(""));
}

#[test]
fn value_validation_messages() {
    assert_eq!(
        validate_value("").unwrap_err(),
        "Transaction value cannot be empty!"
    );
    assert_eq!(
        validate_value("0.000").unwrap_err(),
        "Transaction value cannot be 0!"
    );
    assert_eq!(
        validate_value("abc").unwrap_err(),
        "Transaction value is not a number!"
    );
    assert!(validate_value("0.25").is_ok());
}

#[test]
fn negative_values_are_clamped_to_zero() {
    let mut form = TransferForm::new();
    form.set_value("-4");
    assert_eq!(form.value, "0");
    form.blur_value();
    assert_eq!(form.value_state.error(), Some("Transaction value cannot be 0!"));
}

#[test]
fn recipient_and_validator_messages() {
    assert_eq!(
        validate_recipient("").unwrap_err(),
        "Recipient's public key cannot be empty!"
    );
    assert_eq!(
        validate_recipient("abc").unwrap_err(),
        "Recipient's public key is not valid!"
    );
    assert_eq!(
        validate_validator(TransferMode::Delegate, "").unwrap_err(),
        "Validator cannot be empty!"
    );
    assert_eq!(
        validate_validator(TransferMode::Delegate, "xyz").unwrap_err(),
        "Validator key is not valid!"
    );
    assert!(validate_validator(TransferMode::Delegate, &key('b')).is_ok());
}

#[test]
fn submission_is_gated_on_every_active_field() {
    let mut form = TransferForm::new();
    assert!(!form.can_submit());

    form = valid_form("5");
    assert!(form.can_submit());

    form.set_mode(TransferMode::Delegate);
    assert!(!form.can_submit());
    form.validator = key('c');
    form.blur_validator();
    assert!(form.can_submit());

    assert_eq!(form.submit(100.0, 0.01, 5001).title(), "Confirm");
}

#[test]
fn gated_form_keeps_dialog_closed() {
    let form = TransferForm::new();
    assert_eq!(form.submit(100.0, 0.0, 5001), TransferDialog::Closed);
}

#[test]
fn insufficient_balance_opens_info_dialog_without_transfer() {
    let form = valid_form("100");
    let dialog = form.submit(100.5, 0.01, 5001);
    assert_eq!(dialog, TransferDialog::InsufficientBalance);
    assert_eq!(dialog.message(), "You have insufficient balance!");
    assert!(dialog.is_open());
    assert_eq!(dialog.confirm(), None);
}

#[test]
fn affordable_transfer_dispatches_only_on_confirm() {
    let form = valid_form("100");
    let dialog = form.submit(101.0, 0.01, 5001);

    let TransferDialog::Confirm(order) = &dialog else {
        panic!("expected confirmation dialog, got {dialog:?}");
    };
    assert_eq!(order.port, 5001);
    assert_eq!(order.value, "100");
    assert_eq!(order.mode, TransferMode::Recipient);

    let action = dialog.confirm().expect("transfer action");
    assert_eq!(action.tag(), "@@saga/MAKE_TRANSFER");
}

#[test]
fn prefilled_link_validates_both_fields() {
    let form = TransferForm::prefilled(Some("12"), Some(&key('d')));
    assert!(form.can_submit());

    let form = TransferForm::prefilled(Some("12"), Some("nothex"));
    assert!(!form.can_submit());
    assert_eq!(
        form.recipient_state.error(),
        Some("Recipient's public key is not valid!")
    );
}
