use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{is_record_array, result_of, scalar_text};

/// Format output as tables using the tabled crate.
///
/// Scalars of each object go into a Field/Value table; nested objects and
/// arrays of records (schedules, rate tables) get their own titled tables.
pub fn print_table(value: &Value) {
    let result = result_of(value);
    match result {
        Value::Object(map) => print_section(None, map),
        Value::Array(arr) => print_records(None, arr),
        _ => println!("{}", result),
    }

    if let Some(envelope) = value.as_object().filter(|m| m.contains_key("result")) {
        print_envelope_notes(envelope);
    }
}

fn print_section(title: Option<&str>, map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut rows = 0;
    for (key, val) in map {
        if val.is_object() || is_record_array(val) {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
        rows += 1;
    }
    if rows > 0 {
        if let Some(title) = title {
            println!("\n{}", title);
        }
        println!("{}", Table::from(builder));
    }

    for (key, val) in map {
        let child_title = match title {
            Some(t) => format!("{t}.{key}"),
            None => key.clone(),
        };
        match val {
            Value::Object(child) => print_section(Some(&child_title), child),
            Value::Array(arr) if is_record_array(val) => print_records(Some(&child_title), arr),
            _ => {}
        }
    }
}

fn print_records(title: Option<&str>, arr: &[Value]) {
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

        if let Some(title) = title {
            println!("\n{}", title);
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
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

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        _ => scalar_text(value),
    }
}
