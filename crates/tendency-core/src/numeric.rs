// Shared numeric helpers: rounding to the tendency grid, clamping, and
// lenient coercion of loosely-typed input values.

use serde_json::Value;

/// Tendencies live on a grid of this step size.
pub const STEP: f64 = 5.0;

/// Round to the nearest multiple of 5, halves away from zero.
///
/// Idempotent: a multiple of 5 divided by 5 is an exact integer in f64, so a
/// second application returns the same value.
pub fn round5(v: f64) -> f64 {
    (v / STEP).round() * STEP
}

/// Clamp `v` into `[lo, hi]`. NaN collapses to `lo`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() {
        return lo;
    }
    v.max(lo).min(hi)
}

/// Linear-scale derivation: `round5(clamp(metric * k, floor, cap))`.
pub fn scaled(metric: f64, k: f64, floor: f64, cap: f64) -> f64 {
    round5(clamp(metric * k, floor, cap))
}

/// `round5(clamp(v, floor, cap))`.
pub fn bounded(v: f64, floor: f64, cap: f64) -> f64 {
    round5(clamp(v, floor, cap))
}

/// Divide, returning `fallback` when the denominator is zero or the result is
/// not finite.
pub fn ratio_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        return fallback;
    }
    let r = numerator / denominator;
    if r.is_finite() {
        r
    } else {
        fallback
    }
}

/// Coerce a JSON value to a finite f64.
///
/// Numbers pass through when finite; strings are trimmed and parsed; booleans,
/// nulls, arrays, objects and unparsable strings yield `None`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Return `value` if it is present and finite, otherwise `default`.
pub fn safe(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round5_rounds_halves_away_from_zero() {
        assert_eq!(round5(12.5), 15.0);
        assert_eq!(round5(12.4), 10.0);
        assert_eq!(round5(-12.5), -15.0);
        assert_eq!(round5(54.5454), 55.0);
        assert_eq!(round5(0.0), 0.0);
    }

    #[test]
    fn round5_is_idempotent_on_samples() {
        for v in [-33.3, -2.5, 0.1, 7.5, 22.49, 97.5, 1e6 + 2.5] {
            assert_eq!(round5(round5(v)), round5(v), "value {v}");
        }
    }

    #[test]
    fn clamp_handles_nan() {
        assert_eq!(clamp(f64::NAN, 10.0, 60.0), 10.0);
        assert_eq!(clamp(100.0, 10.0, 60.0), 60.0);
        assert_eq!(clamp(-3.0, 10.0, 60.0), 10.0);
    }

    #[test]
    fn ratio_or_guards_zero_and_non_finite() {
        assert_eq!(ratio_or(3.0, 0.0, 0.5), 0.5);
        assert_eq!(ratio_or(f64::INFINITY, 1.0, 0.0), 0.0);
        assert_eq!(ratio_or(3.0, 12.0, 0.0), 0.25);
    }

    #[test]
    fn coerce_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_f64(&json!(4.5)), Some(4.5));
        assert_eq!(coerce_f64(&json!(7)), Some(7.0));
        assert_eq!(coerce_f64(&json!(" 31.2 ")), Some(31.2));
    }

    #[test]
    fn coerce_rejects_everything_else() {
        assert_eq!(coerce_f64(&json!(null)), None);
        assert_eq!(coerce_f64(&json!("NaN")), None);
        assert_eq!(coerce_f64(&json!("inf")), None);
        assert_eq!(coerce_f64(&json!("n/a")), None);
        assert_eq!(coerce_f64(&json!(true)), None);
        assert_eq!(coerce_f64(&json!([1.0])), None);
        assert_eq!(coerce_f64(&json!({"v": 1.0})), None);
    }

    #[test]
    fn safe_falls_back_on_missing_or_non_finite() {
        assert_eq!(safe(None, 3.0), 3.0);
        assert_eq!(safe(Some(f64::NAN), 3.0), 3.0);
        assert_eq!(safe(Some(1.5), 3.0), 1.5);
    }
}
