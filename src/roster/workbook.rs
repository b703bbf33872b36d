//! Elevlistor direkt från arbetsböcker (xlsx, xls, ods)

use std::io::Cursor;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde_json::Value;

use super::parser::{RosterRow, SpreadsheetParser};

/// Läser första bladet; första raden är kolumnrubriker
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxParser;

impl SpreadsheetParser for XlsxParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<RosterRow>> {
        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes)).context("Kunde inte öppna arbetsboken")?;

        let range = workbook
            .worksheet_range_at(0)
            .context("Arbetsboken saknar blad")?
            .context("Kunde inte läsa första bladet")?;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(Vec::new());
        };
        let headers: Vec<Option<String>> = header_row.iter().map(header_text).collect();

        let parsed: Vec<RosterRow> = rows
            .filter(|cells| cells.iter().any(|c| !matches!(c, Data::Empty)))
            .map(|cells| {
                headers
                    .iter()
                    .zip(cells)
                    .filter_map(|(header, cell)| Some((header.clone()?, cell_value(cell))))
                    .collect()
            })
            .collect();

        Ok(parsed)
    }
}

fn header_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => Value::from(*f),
        Data::Bool(b) => Value::from(*b),
        Data::String(s) => Value::from(s.as_str()),
        Data::Empty | Data::Error(_) => Value::Null,
        other => Value::from(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use crate::roster::RosterImporter;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Siswa" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

    fn text(cell: &str, value: &str) -> String {
        format!(r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#, cell, value)
    }

    fn number(cell: &str, value: &str) -> String {
        format!(r#"<c r="{}"><v>{}</v></c>"#, cell, value)
    }

    /// Minimal arbetsbok med ett blad: rubrikrad och två elever
    fn roster_workbook() -> Vec<u8> {
        let rows = [
            format!(
                r#"<row r="1">{}{}{}{}</row>"#,
                text("A1", "NIS"),
                text("B1", " Nama "),
                text("C1", "Kelas"),
                text("D1", "Gender")
            ),
            format!(
                r#"<row r="2">{}{}{}{}</row>"#,
                number("A2", "9001"),
                text("B2", "Budi"),
                text("C2", "VIII B"),
                text("D2", "L")
            ),
            format!(r#"<row r="3">{}{}</row>"#, text("B3", "Siti"), text("C3", "IX")),
        ];
        let sheet = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            rows.concat()
        );

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, body) in [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("xl/workbook.xml", WORKBOOK.to_string()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
            ("xl/worksheets/sheet1.xml", sheet),
        ] {
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_reads_first_sheet_with_header_row() {
        let rows = XlsxParser.parse(&roster_workbook()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Nama"], Value::from("Budi"));
        assert_eq!(rows[0]["Kelas"], Value::from("VIII B"));
        assert_eq!(rows[1]["Nama"], Value::from("Siti"));
        assert!(rows[1].get("NIS").map_or(true, Value::is_null));
    }

    #[test]
    fn test_workbook_rows_import_as_students() {
        let rows = XlsxParser.parse(&roster_workbook()).unwrap();
        let result = RosterImporter::with_timestamp(500).import_rows(&rows);

        let budi = &result.students[0];
        assert_eq!(budi.id, "9001");
        assert_eq!(budi.class_id, "8B");
        assert_eq!(budi.gender, Gender::Male);

        let siti = &result.students[1];
        assert_eq!(siti.class_id, "9");
        assert_eq!(siti.gender, Gender::Female);
        assert_eq!(siti.id, "501");
    }

    #[test]
    fn test_rejects_non_workbook_bytes() {
        assert!(XlsxParser.parse(b"Nama,NIS\nBudi,9001").is_err());
    }
}
