// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

use serde_json::{Map, Value};

use crate::config::options::ExportFormat;

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant).
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                // move the field without cloning
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- JSON ---------------- */

/// Rows as an array of objects keyed by header. Missing headers become
/// `col1`, `col2`, …; short rows leave keys out.
pub fn rows_to_json(headers: &Option<Vec<String>>, rows: &[Vec<String>]) -> Value {
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let keys: Vec<String> = (0..width)
        .map(|i| {
            headers
                .as_ref()
                .and_then(|h| h.get(i))
                .cloned()
                .unwrap_or_else(|| format!("col{}", i + 1))
        })
        .collect();

    let objects = rows
        .iter()
        .map(|r| {
            let mut obj = Map::new();
            for (k, v) in keys.iter().zip(r.iter()) {
                obj.insert(k.clone(), Value::String(v.clone()));
            }
            Value::Object(obj)
        })
        .collect();
    Value::Array(objects)
}

/* ---------------- Export strings ---------------- */

/// Create a full export string (Copy/Export).
/// - `include_headers` only affects delimited formats; JSON always keys by header.
pub fn to_export_string(
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    include_headers: bool,
    format: ExportFormat,
) -> String {
    let Some(sep) = format.delimiter() else {
        return serde_json::to_string_pretty(&rows_to_json(headers, rows)).unwrap_or_default();
    };

    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        if let Some(h) = headers {
            let _ = write_row(&mut buf, h, sep);
        }
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_fields_survive() {
        let text = "a,\"b, c\",\"say \"\"hi\"\"\"\r\n\r\nd,e,f\n";
        let rows = parse_rows(text, ',');
        assert_eq!(rows, vec![
            vec![s!("a"), s!("b, c"), s!("say \"hi\"")],
            vec![s!("d"), s!("e"), s!("f")],
        ]);
    }

    #[test]
    fn export_csv_and_tsv() {
        let h = Some(vec![s!("docket"), s!("info")]);
        let rows = vec![vec![s!("MC-1"), s!("ACME, INC")]];
        assert_eq!(to_export_string(&h, &rows, true, ExportFormat::Csv), "docket,info\nMC-1,\"ACME, INC\"\n");
        assert_eq!(to_export_string(&h, &rows, false, ExportFormat::Tsv), "MC-1\tACME, INC\n");
    }

    #[test]
    fn export_json_keys_by_header() {
        let h = Some(vec![s!("docket")]);
        let rows = vec![vec![s!("MC-1"), s!("extra")]];
        let v: Value = serde_json::from_str(&to_export_string(&h, &rows, false, ExportFormat::Json)).unwrap();
        assert_eq!(v[0]["docket"], "MC-1");
        assert_eq!(v[0]["col2"], "extra");
    }
}
