use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{breakdown_rows, scalar_text};

/// Format output as tables: the scalar result fields, then the breakdown rows.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result_tables(result, map),
            _ => print_field_table(map),
        },
        Value::Array(arr) => print_row_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in result {
        if !val.is_array() {
            builder.push_record([key.as_str(), &scalar_text(val)]);
        }
    }
    println!("{}", Table::from(builder));

    if let Some(rows) = breakdown_rows(result) {
        println!();
        print_row_table(rows);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &scalar_text(val)]);
    }
    println!("{}", Table::from(builder));
}

/// One row per object; nested arrays (monthly detail) are left out.
fn print_row_table(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", scalar_text(item));
        }
        return;
    };

    let headers: Vec<String> = first
        .iter()
        .filter(|(_, v)| !v.is_array())
        .map(|(k, _)| k.clone())
        .collect();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}
