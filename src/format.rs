/// Display formatting for readings.
///
/// Decimal output is produced from integers (scale by `10^d`, add 0.5,
/// truncate) rather than through float formatting, so halves always round
/// up and the result never depends on the float printer.

/// Placeholder for a missing value.
pub const NO_VALUE: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Cfs,
    Feet,
    Fahrenheit,
    Other,
}

impl Unit {
    /// Recognizes the unit spellings used by DWR and USGS.
    pub fn from_label(unit: &str) -> Unit {
        let normalized: String = unit
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '°' && *c != '.')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "cfs" | "ft3/s" => Unit::Cfs,
            "ft" | "feet" => Unit::Feet,
            "f" | "degf" | "fahrenheit" => Unit::Fahrenheit,
            _ => Unit::Other,
        }
    }
}

/// Formats a reading for display; `None` is `"--"`.
///
/// - CFS: ≥1000 grouped integer, ≥100 integer, ≥10 one decimal, else two
/// - feet: two decimals
/// - Fahrenheit: integer
///
/// Integer paths truncate; only the decimal paths round.
pub fn format_value(value: Option<f64>, unit: &str) -> String {
    let Some(value) = value else {
        return NO_VALUE.to_string();
    };
    match Unit::from_label(unit) {
        Unit::Cfs => format_cfs(value),
        Unit::Feet | Unit::Other => format_decimal(value, 2),
        Unit::Fahrenheit => format_truncated(value),
    }
}

fn format_cfs(value: f64) -> String {
    if value >= 1000.0 {
        group_thousands(value.trunc() as i64)
    } else if value >= 100.0 {
        format_truncated(value)
    } else if value >= 10.0 {
        format_decimal(value, 1)
    } else {
        format_decimal(value, 2)
    }
}

/// Water temperature with its unit, e.g. `"52°F"`.
pub fn format_temperature(temperature_f: Option<f64>) -> String {
    match temperature_f {
        Some(t) => format!("{}°F", format_truncated(t)),
        None => NO_VALUE.to_string(),
    }
}

/// Signed whole percent, e.g. `"+18%"`, `"-4%"`, `"0%"`.
pub fn format_change_percent(change_percent: f64) -> String {
    let whole = change_percent.trunc() as i64;
    if whole > 0 {
        format!("+{}%", whole)
    } else {
        format!("{}%", whole)
    }
}

fn format_truncated(value: f64) -> String {
    (value.trunc() as i64).to_string()
}

/// Round half-up at `decimals` places using integer arithmetic.
///
/// The scaled value is nudged by a few ULPs before truncation so that a
/// decimal tie such as `9.995`, stored as `9.99499999…`, still rounds up.
pub fn format_decimal(value: f64, decimals: u32) -> String {
    let scale = 10_u64.pow(decimals);
    let negative = value < 0.0;
    let scaled = value.abs() * scale as f64;
    // Without this 9.995 comes out as "9.99" instead of "10.00".
    let nudge = scaled * f64::EPSILON * 4.0;
    let rounded = (scaled + 0.5 + nudge).trunc() as u64;

    let whole = rounded / scale;
    let frac = rounded % scale;
    let sign = if negative && rounded != 0 { "-" } else { "" };
    if decimals == 0 {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{:0width$}", sign, whole, frac, width = decimals as usize)
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_is_dashes() {
        assert_eq!(format_value(None, "CFS"), "--");
        assert_eq!(format_value(None, "ft"), "--");
    }

    #[test]
    fn test_cfs_precision_tiers() {
        assert_eq!(format_value(Some(1234.5), "CFS"), "1,234");
        assert_eq!(format_value(Some(12345.9), "cfs"), "12,345");
        assert_eq!(format_value(Some(999.9), "CFS"), "999");
        assert_eq!(format_value(Some(100.0), "CFS"), "100");
        assert_eq!(format_value(Some(45.25), "CFS"), "45.3");
        assert_eq!(format_value(Some(10.0), "CFS"), "10.0");
        assert_eq!(format_value(Some(3.14159), "CFS"), "3.14");
        assert_eq!(format_value(Some(0.0), "CFS"), "0.00");
    }

    #[test]
    fn test_cfs_tier_edges() {
        assert_eq!(format_value(Some(1000.0), "CFS"), "1,000");
        assert_eq!(format_value(Some(99.95), "CFS"), "100.0");
    }

    #[test]
    fn test_two_decimal_path_rounds_half_up() {
        assert_eq!(format_value(Some(9.995), "CFS"), "10.00");
        assert_eq!(format_value(Some(9.999), "CFS"), "10.00");
        assert_eq!(format_value(Some(9.994), "CFS"), "9.99");
        assert_eq!(format_decimal(0.125, 2), "0.13");
        assert_eq!(format_decimal(2.675, 2), "2.68");
    }

    #[test]
    fn test_feet_always_two_decimals() {
        assert_eq!(format_value(Some(2.4), "FT"), "2.40");
        assert_eq!(format_value(Some(12.0), "feet"), "12.00");
        assert_eq!(format_value(Some(1500.555), "ft"), "1500.56");
    }

    #[test]
    fn test_fahrenheit_truncates() {
        assert_eq!(format_value(Some(52.9), "F"), "52");
        assert_eq!(format_value(Some(52.9), "°F"), "52");
        assert_eq!(format_value(Some(52.9), "deg F"), "52");
        assert_eq!(format_temperature(Some(67.99)), "67°F");
        assert_eq!(format_temperature(None), "--");
    }

    #[test]
    fn test_negative_values_keep_sign() {
        assert_eq!(format_decimal(-1.005, 2), "-1.01");
        assert_eq!(format_decimal(-0.001, 2), "0.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-45000), "-45,000");
    }

    #[test]
    fn test_change_percent_is_signed_whole() {
        assert_eq!(format_change_percent(17.6), "+17%");
        assert_eq!(format_change_percent(-4.9), "-4%");
        assert_eq!(format_change_percent(0.3), "0%");
    }
}
