use serde_json::Value;
use std::io;

use super::{breakdown_rows, scalar_text};

/// Write output as CSV to stdout.
///
/// Results with a breakdown are written as one record per row; anything
/// else becomes a two-column `field,value` listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .and_then(Value::as_object);

    match (result, value) {
        (Some(result), _) => match breakdown_rows(result) {
            Some(rows) => write_rows(&mut wtr, rows),
            None => write_fields(&mut wtr, result),
        },
        (None, Value::Object(map)) => write_fields(&mut wtr, map),
        (None, Value::Array(arr)) => write_rows(&mut wtr, arr),
        (None, other) => {
            let _ = wtr.write_record([scalar_text(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_fields(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &serde_json::Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &scalar_text(val)]);
    }
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            let _ = wtr.write_record([scalar_text(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first
        .iter()
        .filter(|(_, v)| !v.is_array())
        .map(|(k, _)| k.as_str())
        .collect();
    let _ = wtr.write_record(&headers);

    for map in rows.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&row);
    }
}
