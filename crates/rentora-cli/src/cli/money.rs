//! Parsing for human-entered money amounts.
//!
//! All amounts are stored in minor currency units (pence). Input accepts
//! plain figures ("950"), decimals ("795.50"), thousands separators
//! ("1,200") and an optional leading pound sign.

/// Parse a human-entered amount into minor currency units.
///
/// Accepts at most two decimal places; one decimal digit is read as tens
/// of pence ("9.5" == "9.50").
pub(crate) fn parse_money(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    let cleaned = trimmed.strip_prefix('£').unwrap_or(trimmed).replace(',', "");
    if cleaned.is_empty() {
        return Err(format!("invalid amount: '{raw}'"));
    }

    let (whole, frac) = match cleaned.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (cleaned.as_str(), ""),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid amount: '{raw}'"));
    }

    let frac_minor: u64 = if frac.is_empty() {
        0
    } else if frac.len() <= 2 && frac.bytes().all(|b| b.is_ascii_digit()) {
        let parsed: u64 = frac
            .parse()
            .map_err(|_| format!("invalid amount: '{raw}'"))?;
        if frac.len() == 1 { parsed * 10 } else { parsed }
    } else {
        return Err(format!("invalid amount: '{raw}'"));
    };

    // Digits are already validated, so the only parse failure is overflow.
    let whole_minor: u64 = whole
        .parse()
        .map_err(|_| "amount out of range".to_string())?;
    whole_minor
        .checked_mul(100)
        .and_then(|pence| pence.checked_add(frac_minor))
        .ok_or_else(|| "amount out of range".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_pounds() {
        assert_eq!(parse_money("950"), Ok(95_000));
    }

    #[test]
    fn test_parse_two_decimal_places() {
        assert_eq!(parse_money("795.50"), Ok(79_550));
    }

    #[test]
    fn test_parse_one_decimal_place() {
        assert_eq!(parse_money("9.5"), Ok(950));
    }

    #[test]
    fn test_parse_with_thousands_separators() {
        assert_eq!(parse_money("1,200"), Ok(120_000));
    }

    #[test]
    fn test_parse_with_pound_sign() {
        assert_eq!(parse_money("£1,450.00"), Ok(145_000));
    }

    #[test]
    fn test_rejects_three_decimal_places() {
        assert!(parse_money("9.505").is_err());
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(parse_money("abc").is_err());
        assert!(parse_money("12a").is_err());
        assert!(parse_money("").is_err());
    }

    #[test]
    fn test_rejects_negative_amounts() {
        assert!(parse_money("-50").is_err());
    }

    #[test]
    fn test_overflow_is_out_of_range() {
        assert_eq!(
            parse_money("999999999999999999999"),
            Err("amount out of range".to_string())
        );
    }
}
