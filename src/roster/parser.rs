//! Omvandling av kalkylbladsdata till rader nycklade på kolumnrubrik

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

/// En rad: kolumnrubrik -> cellvärde (godtycklig JSON-typ)
pub type RosterRow = HashMap<String, Value>;

/// Läser första bladet i ett kalkylblad till rader
pub trait SpreadsheetParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<RosterRow>>;

    fn parse_file(&self, path: &Path) -> Result<Vec<RosterRow>> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Kunde inte läsa {}", path.display()))?;
        self.parse(&bytes)
    }
}

/// Rader exporterade som en JSON-array av objekt
/// (formen man får från "sheet to JSON" i kalkylbladsverktyg).
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRowsParser;

impl SpreadsheetParser for JsonRowsParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<RosterRow>> {
        let value: Value = serde_json::from_slice(bytes).context("Ogiltig JSON i elevlistan")?;

        let Value::Array(items) = value else {
            bail!("Elevlistan måste vara en JSON-array");
        };

        // Rader som inte är objekt blir tomma rader och får standardvärden
        let rows = items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => map.into_iter().collect(),
                _ => RosterRow::new(),
            })
            .collect();

        Ok(rows)
    }
}
