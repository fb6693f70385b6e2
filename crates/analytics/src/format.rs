use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a money amount the way the metric cards show it: `"Rp 1,234,567.89"`.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    let amount = format!("{sign}{}.{cents}", group_thousands(whole));
    if symbol.is_empty() {
        amount
    } else {
        format!("{symbol} {amount}")
    }
}

/// Formats a count with thousands separators: `"12,345"`.
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_has_separators_and_two_decimals() {
        assert_eq!(format_money(dec!(1234567.891), "Rp"), "Rp 1,234,567.89");
        assert_eq!(format_money(dec!(25), "Rp"), "Rp 25.00");
        assert_eq!(format_money(dec!(999.995), "$"), "$ 1,000.00");
        assert_eq!(format_money(Decimal::ZERO, ""), "0.00");
        assert_eq!(format_money(dec!(-1500.5), "Rp"), "Rp -1,500.50");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(98_666), "98,666");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
