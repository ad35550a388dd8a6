// src/csv.rs
// Minimal CSV/TSV writing for exports (quotes + CRLF tolerant). std-only.

use std::io::{self, Write};

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

/// Stringify rows as-is, headers first when present.
pub fn rows_to_string(rows: &[Vec<String>], headers: &Option<Vec<String>>, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if let Some(h) = headers {
        let _ = write_row(&mut buf, h, sep);
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
    fn quotes_fields_that_need_them() {
        let rows = vec![vec![s!("a,b"), s!("plain"), s!("say \"hi\"")]];
        let out = rows_to_string(&rows, &None, ',');
        assert_eq!(out, "\"a,b\",plain,\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn tsv_leaves_commas_alone() {
        let rows = vec![vec![s!("a,b"), s!("c")]];
        let out = rows_to_string(&rows, &None, '\t');
        assert_eq!(out, "a,b\tc\n");
    }

    #[test]
    fn headers_come_first() {
        let headers = Some(vec![s!("Team"), s!("Url")]);
        let rows = vec![vec![s!("A"), s!("u")]];
        let out = rows_to_string(&rows, &headers, ',');
        assert_eq!(out, "Team,Url\nA,u\n");
    }
}
