//! Number formatting for terminal output

/// Atomic units per SAL.
const COIN: f64 = 100_000_000.0;

/// Scale a raw H/s figure through the unit ladder, two decimals.
pub fn format_hashrate(mut hashrate: f64) -> String {
    const UNITS: [&str; 5] = ["H/s", "KH/s", "MH/s", "GH/s", "TH/s"];
    let mut unit = 0;
    while hashrate >= 1000.0 && unit < UNITS.len() - 1 {
        hashrate /= 1000.0;
        unit += 1;
    }
    format!("{:.2} {}", hashrate, UNITS[unit])
}

/// Thousands-separated integer.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Atomic units rendered as whole SAL.
pub fn format_sal(atomic: u64) -> String {
    format!("{} SAL", format_number((atomic as f64 / COIN).round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashrate_walks_the_unit_ladder() {
        assert_eq!(format_hashrate(0.0), "0.00 H/s");
        assert_eq!(format_hashrate(999.0), "999.00 H/s");
        assert_eq!(format_hashrate(1_000.0), "1.00 KH/s");
        assert_eq!(format_hashrate(50_000.0 / 120.0), "416.67 H/s");
        assert_eq!(format_hashrate(2_500_000.0), "2.50 MH/s");
        assert_eq!(format_hashrate(1.5e12), "1.50 TH/s");
        // Values past the top unit stay in TH/s.
        assert_eq!(format_hashrate(2.0e15), "2000.00 TH/s");
    }

    #[test]
    fn numbers_get_thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(100), "100");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn atomic_units_render_as_whole_sal() {
        assert_eq!(format_sal(0), "0 SAL");
        assert_eq!(format_sal(250_000_000), "3 SAL");
        assert_eq!(format_sal(123_400_000_000), "1,234 SAL");
    }
}
