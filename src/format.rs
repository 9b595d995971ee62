//! Defensive text and number formatting shared by every field emitter.
//!
//! Sanitization never rejects: a warehouse operator must always be able to
//! print *something*, so bad characters degrade to spaces and bad numbers
//! format as zero.

/// Strip ZPL in-band metacharacters from field text.
///
/// `^`, `~` and `\` are command/escape introducers in ZPL; left in field
/// data they would be interpreted by the printer and corrupt the job. Each
/// is replaced by a space, and whitespace runs (including the replacements)
/// collapse to a single space. Idempotent.
pub fn sanitize(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| match c {
            '^' | '~' | '\\' => ' ',
            c if c.is_whitespace() => ' ',
            c => c,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Format a monetary amount as a currency string with digit grouping,
/// e.g. `money(1050.0)` is `"$1,050.00"`.
///
/// Missing, NaN or infinite input formats as `"$0.00"`. Never fails and
/// never produces an empty string: numeric fields always print a value.
pub fn money<V: Into<Option<f64>>>(value: V) -> String {
    let v = value.into().filter(|v| v.is_finite()).unwrap_or(0.0);
    let sign = if v < 0.0 { "-" } else { "" };
    let cents = (v.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    format!("{sign}${}.{frac:02}", group_thousands(whole))
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let g = n % 1000;
        n /= 1000;
        if n == 0 {
            groups.push(g.to_string());
            break;
        }
        groups.push(format!("{g:03}"));
    }
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_metacharacters() {
        assert_eq!(sanitize("AB^CD~EF\\GH"), "AB CD EF GH");
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(sanitize("a  b\t\nc ^ ~ d"), "a b c d");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize("x^^y  z\\");
        assert_eq!(sanitize(&once), once);
        assert!(!once.contains(['^', '~', '\\']));
    }

    #[test]
    fn test_sanitize_plain_text_unchanged() {
        assert_eq!(sanitize("ABC123"), "ABC123");
    }

    #[test]
    fn test_money_plain() {
        assert_eq!(money(10.5), "$10.50");
        assert_eq!(money(199.99), "$199.99");
    }

    #[test]
    fn test_money_grouping() {
        assert_eq!(money(1050.0), "$1,050.00");
        assert_eq!(money(1_234_567.89), "$1,234,567.89");
    }

    #[test]
    fn test_money_invalid_formats_as_zero() {
        assert_eq!(money(f64::NAN), "$0.00");
        assert_eq!(money(f64::NEG_INFINITY), "$0.00");
        assert_eq!(money(None), "$0.00");
    }

    #[test]
    fn test_money_negative() {
        assert_eq!(money(-3.5), "-$3.50");
    }
}
