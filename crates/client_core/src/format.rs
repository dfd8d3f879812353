use chrono::{DateTime, Utc};

/// Groups the integer digits of a decimal amount with commas.
///
/// Only the integer part is grouped; a fractional part is carried through
/// untouched. Input that is not a plain decimal is returned as-is.
pub fn format_number(value: impl ToString) -> String {
    let raw = value.to_string();
    let trimmed = raw.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return raw;
    }

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Inverse of [`format_number`] for arithmetic: strips separators and
/// parses. Empty or unparsable input reads as zero.
pub fn parse_amount(value: &str) -> f64 {
    value.replace(',', "").trim().parse::<f64>().unwrap_or(0.0)
}

/// Renders a fee rate the way the backend's agent route is displayed: six
/// decimals.
pub fn format_fee(raw: &str) -> Option<String> {
    let fee = raw.trim().parse::<f64>().ok()?;
    Some(format!("{fee:.6}"))
}

/// `lock_time` seconds rendered as `D Mon YYYY H:M:S` in UTC.
pub fn timestamp_to_utc(timestamp: f64) -> Option<String> {
    let secs = timestamp.trunc() as i64;
    let time: DateTime<Utc> = DateTime::from_timestamp(secs, 0)?;
    Some(time.format("%-d %b %Y %-H:%-M:%-S").to_string())
}
