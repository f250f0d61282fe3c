use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalar fields go in a Field/Value table; every array of objects
/// (risk factors, recommendations, contributions, issues) gets its own table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_object(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        other => print_table(other),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut sections: Vec<(&str, &Vec<Value>)> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Array(items) if items.iter().any(Value::is_object) => {
                sections.push((key.as_str(), items));
            }
            _ => {
                builder.push_record([key.as_str(), &format_value(val)]);
            }
        }
    }
    println!("{}", Table::from(builder));

    for (title, items) in sections {
        println!("\n{}:", title);
        print_array_table(items);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
