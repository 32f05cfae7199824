use crate::core::display::round1;
use crate::utils::error::{DatasetKind, LookupError, Result};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Statistics Denmark tabular data API.
pub const STATBANK_URL: &str = "https://api.statbank.dk/v1/data";

/// KVRES: local-election results by area and result type.
/// V = eligible voters, AS = cast ballots.
const TABLE: &str = "KVRES";
const RESULT_TYPES: [&str; 2] = ["V", "AS"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub navn: String,
    pub stemmeprocent: f64,
}

#[derive(Debug, Deserialize)]
struct StatbankRow {
    #[serde(rename = "OMRÅDE")]
    omraade: String,
    #[serde(rename = "VALRES")]
    valres: String,
    #[serde(rename = "INDHOLD")]
    indhold: String,
}

#[derive(Debug, Default)]
struct Counts {
    navn: String,
    eligible: Option<f64>,
    cast: Option<f64>,
}

/// POST the statbank query and return the CSV answer.
pub async fn fetch_statbank_csv(client: &Client, endpoint: &str, year: &str) -> Result<String> {
    let body = serde_json::json!({
        "table": TABLE,
        "format": "CSV",
        "time": [year],
        "OMRÅDE": ["*"],
        "VALRES": RESULT_TYPES,
    });

    tracing::debug!(%endpoint, year, "requesting statbank table");
    let response = client.post(endpoint).json(&body).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::Retrieval {
            dataset: DatasetKind::Reference,
            status,
        });
    }

    Ok(response.text().await?)
}

/// Parse the semicolon-delimited statbank CSV into reference turnout rows.
///
/// Expected columns: OMRÅDE;VALRES;TID;INDHOLD, with the area field usually
/// carrying code and name together ("751 Syddjurs"). Municipalities missing
/// either count are skipped; turnout is 100 × cast / eligible, one decimal.
pub fn parse_statbank_csv(csv_text: &str) -> Result<BTreeMap<String, ReferenceRow>> {
    let area_re = Regex::new(r"^(\d+)\s+(.+)$").map_err(|e| LookupError::Processing {
        message: format!("invalid area pattern: {}", e),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(csv_text.as_bytes());

    let mut counts: BTreeMap<String, Counts> = BTreeMap::new();

    for row in reader.deserialize() {
        let row: StatbankRow = row?;

        if row.omraade.is_empty() || row.valres.is_empty() || row.indhold.is_empty() {
            continue;
        }

        let (kode, navn) = match area_re.captures(&row.omraade) {
            Some(caps) => (caps[1].to_string(), caps[2].to_string()),
            None => (row.omraade.clone(), row.omraade.clone()),
        };

        // Statbank uses a comma decimal separator.
        let value: f64 = match row.indhold.replace(',', ".").parse() {
            Ok(v) => v,
            Err(_) => continue,
        };

        let entry = counts.entry(kode).or_insert_with(|| Counts {
            navn,
            ..Counts::default()
        });

        let valres = row.valres.to_uppercase();
        if valres.starts_with("VÆLGERE") || valres == "V" {
            entry.eligible = Some(value);
        } else if valres.contains("AFGIVNE") || valres == "AS" {
            entry.cast = Some(value);
        }
    }

    let mut result = BTreeMap::new();
    for (kode, entry) in counts {
        let (Some(eligible), Some(cast)) = (entry.eligible, entry.cast) else {
            continue;
        };
        if eligible <= 0.0 {
            continue;
        }
        result.insert(
            kode,
            ReferenceRow {
                navn: entry.navn,
                stemmeprocent: round1(100.0 * cast / eligible),
            },
        );
    }

    Ok(result)
}

/// Write the reference dataset JSON, creating parent directories.
pub fn write_reference_file(path: &Path, rows: &BTreeMap<String, ReferenceRow>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(rows)?;
    fs::write(path, json)?;
    tracing::info!(kommuner = rows.len(), path = %path.display(), "wrote reference dataset");
    Ok(())
}
