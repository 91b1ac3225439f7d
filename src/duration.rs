//! Duration expression parsing.
//!
//! Cooldowns, timeouts and slot expirations are entered as short
//! human-friendly expressions ("90", "30m", "2d"). Parsing never fails hard:
//! malformed input is reported as `None` and the caller decides what that
//! means for the field at hand.

use regex::Regex;

/// Seconds per unit: s, m, h, d.
const UNITS: [(char, u64); 4] = [('s', 1), ('m', 60), ('h', 3600), ('d', 86400)];

/// Parse a duration expression into whole seconds.
///
/// Accepted shapes:
/// - `""` → `None` (the field is unset/disabled)
/// - `"90"` → 90 (bare digits are literal seconds)
/// - `"<number>[.<decimals>]<unit>"` with unit ∈ {s, m, h, d} → value ×
///   unit factor, rounded to the nearest whole second
///
/// Anything else → `None`. Never panics.
pub fn parse_duration(input: &str) -> Option<u64> {
    if input.is_empty() {
        return None;
    }

    if input.bytes().all(|b| b.is_ascii_digit()) {
        return input.parse().ok();
    }

    let unit = input.chars().last()?;
    let factor = UNITS.iter().find(|(u, _)| *u == unit)?.1;
    let num_str = &input[..input.len() - unit.len_utf8()];

    // Digits, then at most one dot: "1", "1.", "1.5". No sign, no leading dot.
    if !num_str.as_bytes().first().is_some_and(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut dots = 0;
    for b in num_str.bytes() {
        match b {
            b'0'..=b'9' => {}
            b'.' => {
                dots += 1;
                if dots > 1 {
                    return None;
                }
            }
            _ => return None,
        }
    }

    let value: f64 = num_str.parse().ok()?;
    Some((value * factor as f64).round() as u64)
}

/// True iff `value` parses as a duration expression.
pub fn is_valid_duration(value: &str) -> bool {
    parse_duration(value).is_some()
}

/// Format-only check for randomized duration expressions.
///
/// Expressions like `rand(1m;10m)` pick a duration from a range on each
/// redemption. Any string not starting with `rand` passes unconditionally;
/// a `rand` expression must contain `rand(<a>;<b>)` with non-empty halves.
/// The halves are not checked for parseability here.
pub fn is_valid_reward_duration_expression(expr: &str) -> bool {
    if expr.starts_with("rand") {
        let re = Regex::new(r"rand\(([^;]+);([^)]+)\)").unwrap();
        return re.is_match(expr);
    }
    true
}
