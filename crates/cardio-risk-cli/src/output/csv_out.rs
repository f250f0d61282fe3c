use serde_json::Value;
use std::io;

/// Write output as two-column `field,value` CSV to stdout.
///
/// Nested values are flattened into dotted/indexed paths, so a risk result
/// yields rows such as `riskFactors[0].name,Age`.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let mut rows: Vec<(String, String)> = Vec::new();
    flatten("", body, &mut rows);

    let _ = wtr.write_record(["field", "value"]);
    for (path, val) in &rows {
        let _ = wtr.write_record([path.as_str(), val.as_str()]);
    }

    let _ = wtr.flush();
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, val, rows);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&format!("{}[{}]", prefix, i), item, rows);
            }
        }
        _ => rows.push((prefix.to_string(), format_csv_value(value))),
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
