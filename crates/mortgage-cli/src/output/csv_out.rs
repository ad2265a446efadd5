use serde_json::{Map, Value};
use std::io;

use super::{is_record_array, result_of, scalar_text};

/// Write output as CSV to stdout.
///
/// When the result holds a table of records (rate sweep entries or an
/// amortization schedule) that table is written with one row per record.
/// Otherwise the result is flattened into `field,value` pairs with dotted
/// field names.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = result_of(value);
    if let Some(records) = find_records(result) {
        write_records(&mut wtr, records);
    } else {
        let _ = wtr.write_record(["field", "value"]);
        let mut pairs = Vec::new();
        flatten(None, result, &mut pairs);
        for (key, val) in pairs {
            let _ = wtr.write_record([key, val]);
        }
    }

    let _ = wtr.flush();
}

/// Record tables in order of preference.
const RECORD_KEYS: [&str; 3] = ["entries", "rate_sensitivity", "schedule"];

fn find_records(value: &Value) -> Option<&[Value]> {
    if let Value::Array(arr) = value {
        return is_record_array(value).then_some(arr.as_slice());
    }
    let map = value.as_object()?;
    RECORD_KEYS.iter().find_map(|key| {
        let candidate = map.get(*key)?;
        if is_record_array(candidate) {
            candidate.as_array().map(Vec::as_slice)
        } else {
            None
        }
    })
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

fn flatten(prefix: Option<&str>, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => flatten_map(prefix, map, out),
        _ => out.push((prefix.unwrap_or("value").to_string(), scalar_text(value))),
    }
}

fn flatten_map(prefix: Option<&str>, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        if is_record_array(val) {
            continue;
        }
        let name = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        flatten(Some(&name), val, out);
    }
}
