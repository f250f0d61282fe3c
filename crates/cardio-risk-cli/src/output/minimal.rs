use colored::Colorize;
use serde_json::Value;

use cardio_risk_core::RiskLevel;

/// Print just the key answer from the output.
///
/// A risk result prints as `"<percentage>% <tier> (<description>)"` with the
/// tier in its gauge colour; other outputs fall back to the first well-known
/// field, then to the first field of the result.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some((pct, level)) = risk_summary(result_obj) {
        let (r, g, b) = level.color();
        println!(
            "{}% {} ({})",
            pct,
            level.to_string().truecolor(r, g, b).bold(),
            level.description()
        );
        return;
    }

    let priority_keys = ["isValid", "rawScore"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    if let Value::Array(items) = result_obj {
        println!("{}", items.len());
        return;
    }

    println!("{}", format_minimal(result_obj));
}

fn risk_summary(result: &Value) -> Option<(u64, RiskLevel)> {
    let pct = result.get("riskPercentage")?.as_u64()?;
    let level: RiskLevel = serde_json::from_value(result.get("riskLevel")?.clone()).ok()?;
    Some((pct, level))
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
