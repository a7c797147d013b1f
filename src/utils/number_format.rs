//! Compact count formatting for star, fork and watcher numbers.

/// Unit boundaries and their suffixes, smallest first.
const UNITS: [(u64, &str); 6] = [
    (1_000, "k"),
    (1_000_000, "M"),
    (1_000_000_000, "G"),
    (1_000_000_000_000, "T"),
    (1_000_000_000_000_000, "P"),
    (1_000_000_000_000_000_000, "E"),
];

/// Format a count with a unit suffix, e.g. `1100` becomes `"1.1k"`.
///
/// Values below 1000 are printed as-is. Larger values are divided by the
/// largest unit that fits and keep one decimal only when it is non-zero and
/// the integer part has fewer than four digits.
pub fn format_count(value: u64) -> String {
    let Some((unit, suffix)) = UNITS.iter().rev().find(|(unit, _)| value >= *unit) else {
        return value.to_string();
    };

    // Tenths of a unit; widened so E-range values cannot overflow.
    let tenths = (value as u128 * 10) / *unit as u128;
    let has_decimal = tenths < 10_000 && tenths % 10 != 0;
    if has_decimal {
        format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
    } else {
        format!("{}{}", tenths / 10, suffix)
    }
}
