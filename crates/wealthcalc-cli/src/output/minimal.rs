use serde_json::Value;

use super::scalar_text;

/// Headline field per calculator, tried in order.
const PRIORITY_KEYS: [&str; 7] = [
    "required_monthly_sip",
    "emi",
    "remaining_corpus",
    "maturity_amount",
    "total_amount",
    "progress_pct",
    "interest",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        if let Some(val) = PRIORITY_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|val| !val.is_null())
        {
            println!("{}", scalar_text(val));
            return;
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result_obj));
}
