use serde_json::Value;

use super::{result_of, scalar_text};

/// Headline figures in order of priority; dotted paths reach into nested
/// sections.
const PRIORITY_PATHS: [&str; 5] = [
    "monthly_payment",
    "exact_rate_result.monthly_payment",
    "monthly_housing_cost.total",
    "cash_position",
    "total_paid",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |v, key| v.as_object()?.get(key))
        .filter(|v| !v.is_null())
}

fn minimal_text(value: &Value) -> String {
    let result = result_of(value);

    if let Some(val) = PRIORITY_PATHS.iter().find_map(|p| lookup(result, p)) {
        return scalar_text(val);
    }

    if let Value::Object(map) = result {
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, scalar_text(val));
        }
    }

    scalar_text(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amortization_payment() {
        let v = json!({ "principal": "400000", "monthly_payment": "2398.20" });
        assert_eq!(minimal_text(&v), "2398.20");
    }

    #[test]
    fn test_sweep_uses_exact_rate() {
        let v = json!({ "entries": [], "exact_rate_result": { "monthly_payment": "1438.92" } });
        assert_eq!(minimal_text(&v), "1438.92");
    }

    #[test]
    fn test_analysis_envelope_uses_housing_total() {
        let v = json!({ "result": { "monthly_housing_cost": { "total": "2100.00" } } });
        assert_eq!(minimal_text(&v), "2100.00");
    }

    #[test]
    fn test_affordability_cash_position() {
        let v = json!({ "home_price": "300000", "cash_position": "-22000" });
        assert_eq!(minimal_text(&v), "-22000");
    }
}
