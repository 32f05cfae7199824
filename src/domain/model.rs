use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The live turnout dataset as published alongside the election page.
///
/// The serialized form keys municipalities by code; entries are kept in
/// document order so that first-match resolution is deterministic.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveDataset {
    pub timestamp: String,
    #[serde(deserialize_with = "ordered_kommuner")]
    pub kommuner: Vec<Municipality>,
}

/// One municipality entry, annotated with its code (the join key).
#[derive(Debug, Clone, PartialEq)]
pub struct Municipality {
    pub kode: String,
    pub record: MunicipalityRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MunicipalityRecord {
    pub navn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stemmeprocent: Option<f64>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// 2021 reference turnout keyed by municipality code.
pub type ReferenceDataset = HashMap<String, ReferenceEntry>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferenceEntry {
    #[serde(default)]
    pub stemmeprocent: Option<f64>,
}

/// Success payload of a lookup: the joined and diffed turnout numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnoutReport {
    pub navn: String,
    pub current: Option<f64>,
    pub reference: Option<f64>,
    pub diff: Option<f64>,
    pub timestamp: String,
}

fn ordered_kommuner<'de, D>(deserializer: D) -> Result<Vec<Municipality>, D::Error>
where
    D: Deserializer<'de>,
{
    struct KommunerVisitor;

    impl<'de> Visitor<'de> for KommunerVisitor {
        type Value = Vec<Municipality>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of municipality code to record")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((kode, record)) = map.next_entry::<String, MunicipalityRecord>()? {
                entries.push(Municipality { kode, record });
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(KommunerVisitor)
}
