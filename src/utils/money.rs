// Utilitários para manipulação de valores monetários

use serde_json::Value;

/// Reads a caller-supplied dollar amount. JSON numbers and numeric strings are
/// accepted; anything that is not a finite, strictly positive number is `None`.
pub fn parse_amount(value: Option<&Value>) -> Option<f64> {
    let amount = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (amount.is_finite() && amount > 0.0).then_some(amount)
}

/// Largest cent count an `f64` still holds exactly (2^53).
pub const MAX_MINOR_UNITS: u64 = 1 << 53;

/// Dollars to cents, computed in double precision and rounded half away from zero.
///
/// The multiplication happens before rounding, so representation error is kept:
/// `10.005 * 100.0` is `1000.5000000000001` and becomes `1001`, while
/// `1.005 * 100.0` is `100.49999999999999` and becomes `100`.
///
/// `None` when the result is negative, not finite, or above [`MAX_MINOR_UNITS`].
pub fn to_minor_units(amount: f64) -> Option<u64> {
    let cents = (amount * 100.0).round();
    (cents.is_finite() && cents >= 0.0 && cents <= MAX_MINOR_UNITS as f64).then(|| cents as u64)
}
