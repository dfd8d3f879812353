use super::*;

#[test]
fn toasts_expire_after_their_ttl() {
    let now = Instant::now();
    let mut toasts = Toasts::default();
    toasts.push("Key pair generated!", NOTICE_TTL, now);
    toasts.push_keyed(ROUND_STATUS_TOAST, "AGREE_HASH in progress", ROUND_STATUS_TTL, now);

    toasts.expire(now + Duration::from_secs(3));
    let left: Vec<&str> = toasts.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(left, vec!["Key pair generated!"]);

    toasts.expire(now + Duration::from_secs(6));
    assert!(toasts.is_empty());
}

#[test]
fn keyed_toast_replaces_its_predecessor() {
    let now = Instant::now();
    let mut toasts = Toasts::default();
    toasts.push_keyed(ROUND_STATUS_TOAST, "AGREE_VALIDATOR in progress", ROUND_STATUS_TTL, now);
    toasts.push_keyed(ROUND_STATUS_TOAST, "AGREE_HASH in progress", ROUND_STATUS_TTL, now);

    let left: Vec<&str> = toasts.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(left, vec!["AGREE_HASH in progress"]);
}

#[test]
fn dismiss_ignores_out_of_range_index() {
    let now = Instant::now();
    let mut toasts = Toasts::default();
    toasts.push("Added new key!", NOTICE_TTL, now);
    toasts.dismiss(4);
    assert!(!toasts.is_empty());
    toasts.dismiss(0);
    assert!(toasts.is_empty());
}

#[test]
fn only_changes_into_a_running_round_are_announced() {
    assert_eq!(
        round_status_toast(RoundStatus::Unknown, RoundStatus::AgreeValidator).as_deref(),
        Some("AGREE_VALIDATOR in progress")
    );
    assert_eq!(
        round_status_toast(RoundStatus::AgreeHash, RoundStatus::AgreeHash),
        None
    );
    assert_eq!(
        round_status_toast(RoundStatus::AgreeContent, RoundStatus::Unknown),
        None
    );
}
