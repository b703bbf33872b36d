//! Import av elevlistor
//!
//! Varje rad blir en elev. Saknade eller trasiga celler ger standardvärden,
//! en dålig rad stoppar aldrig importen.

use chrono::Utc;
use serde_json::Value;

use crate::models::{Gender, GradeLevel, Student};

use super::parser::RosterRow;

pub const DEFAULT_NAME: &str = "Siswa Baru";
pub const DEFAULT_CLASS_TOKEN: &str = "VII A";
pub const FALLBACK_CLASS_ID: &str = "7A";

const NIS_COLUMNS: &[&str] = &["NIS", "nis"];
const NAME_COLUMNS: &[&str] = &["Nama Lengkap", "Nama"];
const CLASS_COLUMNS: &[&str] = &["Kelas"];
const GENDER_COLUMNS: &[&str] = &["Gender"];

/// Resultat av en import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Elever i radordning (dubbletter finns kvar, sista vinner vid upsert)
    pub students: Vec<Student>,
    /// Varningar för rader som fick standardvärden
    pub warnings: Vec<String>,
}

impl ImportResult {
    pub fn summary(&self) -> String {
        format!(
            "{} elever importerade{}",
            self.students.len(),
            if self.warnings.is_empty() {
                String::new()
            } else {
                format!(" ({} varningar)", self.warnings.len())
            }
        )
    }
}

/// Elevlist-importer
pub struct RosterImporter {
    /// Bas för genererade NIS
    timestamp: i64,
}

impl Default for RosterImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterImporter {
    pub fn new() -> Self {
        Self::with_timestamp(Utc::now().timestamp_millis())
    }

    pub fn with_timestamp(timestamp: i64) -> Self {
        Self { timestamp }
    }

    pub fn import_rows(&self, rows: &[RosterRow]) -> ImportResult {
        let mut result = ImportResult::default();

        for (index, row) in rows.iter().enumerate() {
            let student = self.row_to_student(index, row, &mut result.warnings);
            result.students.push(student);
        }

        if !result.warnings.is_empty() {
            tracing::warn!(
                "Elevimport: {} rader fick standardvärden",
                result.warnings.len()
            );
        }

        result
    }

    fn row_to_student(&self, index: usize, row: &RosterRow, warnings: &mut Vec<String>) -> Student {
        let line = index + 1;

        let nis = lookup(row, NIS_COLUMNS).unwrap_or_else(|| {
            warnings.push(format!("Rad {}: NIS saknas, genererar", line));
            (self.timestamp + index as i64).to_string()
        });

        let name = lookup(row, NAME_COLUMNS).unwrap_or_else(|| {
            warnings.push(format!("Rad {}: namn saknas", line));
            DEFAULT_NAME.to_string()
        });

        let class_token = lookup(row, CLASS_COLUMNS).unwrap_or_else(|| DEFAULT_CLASS_TOKEN.to_string());
        let class_id = parse_class_token(&class_token).unwrap_or_else(|| {
            warnings.push(format!("Rad {}: okänd klass '{}', använder {}", line, class_token, FALLBACK_CLASS_ID));
            FALLBACK_CLASS_ID.to_string()
        });

        let gender = lookup(row, GENDER_COLUMNS)
            .map(|g| Gender::from_code(&g))
            .unwrap_or(Gender::Female);

        Student::new(nis, name, gender, class_id)
    }
}

/// "VIII B" -> "8B", "IX" -> "9". Årskursen måste vara exakt VII, VIII
/// eller IX; bara nästa ord efter den blir klassbokstav. None annars.
pub fn parse_class_token(token: &str) -> Option<String> {
    let mut parts = token.split_whitespace();
    let grade = GradeLevel::from_roman(parts.next()?)?;
    let suffix = parts.next().unwrap_or_default();
    Some(format!("{}{}", grade.as_str(), suffix))
}

/// Första icke-tomma cellen bland kolumnerna, rubriker jämförs trimmade
fn lookup(row: &RosterRow, columns: &[&str]) -> Option<String> {
    columns.iter().find_map(|column| {
        row.iter()
            .find(|(header, _)| header.trim() == *column)
            .and_then(|(_, value)| cell_to_string(value))
    })
}

/// Cellvärde som trimmad sträng; tomma celler räknas som saknade
fn cell_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
