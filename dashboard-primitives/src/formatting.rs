use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, RoundingMode};

/// Number of fractional digits kept when displaying token balances
pub const BALANCE_FRACTION_DIGITS: i64 = 6;

/// Scales a raw integer token amount down by `10^decimals` for display.
///
/// Balances larger than `u128` are fine. The fraction is rounded half-up to
/// [`BALANCE_FRACTION_DIGITS`] digits and trailing zeros are stripped:
/// `format_balance("1500000", 6) == "1.5"`.
/// Anything that is not a plain unsigned integer renders as `"0"`.
pub fn format_balance(raw: &str, decimals: u32) -> String {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return "0".to_string();
    }
    let Some(amount) = BigInt::parse_bytes(raw.as_bytes(), 10) else {
        return "0".to_string();
    };
    let rounded = BigDecimal::new(amount, i64::from(decimals))
        .with_scale_round(BALANCE_FRACTION_DIGITS, RoundingMode::HalfUp);

    // Fixed-point digits with exactly `BALANCE_FRACTION_DIGITS` fractional places
    let (digits, _) = rounded.as_bigint_and_exponent();
    let fraction_len = BALANCE_FRACTION_DIGITS as usize;
    let digits = format!("{:0>width$}", digits.to_string(), width = fraction_len + 1);
    let (integer_digits, fraction_digits) = digits.split_at(digits.len() - fraction_len);
    let fraction_digits = fraction_digits.trim_end_matches('0');

    if fraction_digits.is_empty() {
        integer_digits.to_string()
    } else {
        format!("{}.{}", integer_digits, fraction_digits)
    }
}

/// `0x1234567890abcdef` -> `0x1234...cdef`
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Sub-cent prices keep six decimals, everything else two.
pub fn format_price(price: f64) -> String {
    if price < 0.01 {
        format!("${:.6}", price)
    } else {
        format!("${:.2}", price)
    }
}

pub const SUPPORTED_CHAINS: &[(u64, &str)] = &[
    (1, "Ethereum"),
    (56, "BSC"),
    (137, "Polygon"),
    (43114, "Avalanche"),
    (250, "Fantom"),
    (42161, "Arbitrum"),
    (10, "Optimism"),
];

pub fn chain_name(chain_id: u64) -> String {
    SUPPORTED_CHAINS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Chain {}", chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_scaling() {
        assert_eq!(format_balance("1500000", 6), "1.5");
        assert_eq!(format_balance("1000000000000000000", 18), "1");
        assert_eq!(format_balance("123", 0), "123");
        assert_eq!(format_balance("0", 18), "0");
        assert_eq!(format_balance("", 18), "0");
        assert_eq!(format_balance("0x10", 18), "0");
    }

    #[test]
    fn balance_rounding() {
        // 0.0000005 rounds up to the sixth digit
        assert_eq!(format_balance("5", 7), "0.000001");
        assert_eq!(format_balance("4", 7), "0");
        // carry propagates into the integer part
        assert_eq!(format_balance("19999995", 7), "2");
        assert_eq!(format_balance("9999999500000000000", 18), "10");
    }

    #[test]
    fn balance_with_few_decimals() {
        assert_eq!(format_balance("12345", 2), "123.45");
        assert_eq!(format_balance("000120", 1), "12");
        assert_eq!(format_balance("1000000", 0), "1000000");
        assert_eq!(format_balance("-5", 0), "0");
        assert_eq!(format_balance("1.5", 0), "0");
    }

    #[test]
    fn balance_beyond_u128() {
        let raw = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(
            format_balance(raw, 18),
            "115792089237316195423570985008687907853269984665640564039457.584008"
        );
    }

    #[test]
    fn address_shortening() {
        assert_eq!(
            shorten_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            "0xd8dA...6045"
        );
        assert_eq!(shorten_address(""), "");
        assert_eq!(shorten_address("0x1234"), "0x1234");
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(0.00123456), "$0.001235");
        assert_eq!(format_price(3412.5), "$3412.50");
        assert_eq!(format_price(0.01), "$0.01");
    }

    #[test]
    fn chain_names() {
        assert_eq!(chain_name(137), "Polygon");
        assert_eq!(chain_name(999), "Chain 999");
    }
}
