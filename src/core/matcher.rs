use crate::domain::model::{LiveDataset, Municipality};

/// Normalize a municipality name or query for comparison.
///
/// The steps are order-sensitive and must match on both sides of the
/// comparison: lowercase, drop the first "kommune", collapse whitespace
/// runs, trim, then fold æ/ø/å to their ASCII digraphs.
pub fn normalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = lowered.replacen("kommune", "", 1);
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .replace('æ', "ae")
        .replace('ø', "oe")
        .replace('å', "aa")
}

/// Resolve a free-text query to a municipality entry.
///
/// The scan walks entries in the dataset's stored order. An exact
/// normalized match wins immediately; otherwise the first entry whose
/// normalized name contains the query is kept. No scoring, no length
/// preference.
pub fn resolve(query: &str, dataset: &LiveDataset) -> Option<Municipality> {
    if query.trim().is_empty() {
        return None;
    }
    let norm = normalize(query);

    let mut partial: Option<&Municipality> = None;

    for municipality in &dataset.kommuner {
        let name = normalize(&municipality.record.navn);

        if name == norm {
            return Some(municipality.clone());
        }
        if partial.is_none() && name.contains(norm.as_str()) {
            partial = Some(municipality);
        }
    }

    partial.cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LiveDataset, MunicipalityRecord};
    use std::collections::HashMap;

    fn dataset(entries: &[(&str, &str)]) -> LiveDataset {
        LiveDataset {
            timestamp: "2025-11-18T14:02:00Z".to_string(),
            kommuner: entries
                .iter()
                .map(|(kode, navn)| Municipality {
                    kode: (*kode).to_string(),
                    record: MunicipalityRecord {
                        navn: (*navn).to_string(),
                        stemmeprocent: Some(60.0),
                        extra: HashMap::new(),
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn normalize_is_idempotent_on_municipality_names() {
        for name in [
            "Aarhus Kommune",
            "Høje-Taastrup",
            "København",
            "Ærø Kommune",
            "  Ringkøbing-Skjern  ",
            "Faaborg-Midtfyn",
        ] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn normalize_drops_kommune_suffix_and_case() {
        assert_eq!(normalize("Aarhus Kommune"), normalize("aarhus"));
        assert_eq!(normalize("KØBENHAVNS KOMMUNE"), "koebenhavns");
    }

    #[test]
    fn normalize_folds_danish_letters() {
        let n = normalize("Høje-Taastrup");
        assert!(!n.contains('ø') && !n.contains('æ') && !n.contains('å'));
        assert_eq!(n, "hoeje-taastrup");
        assert_eq!(normalize("Ærø"), "aeroe");
    }

    #[test]
    fn normalize_collapses_whitespace_runs() {
        assert_eq!(normalize("  Ikast -   Brande \t Kommune "), "ikast - brande");
    }

    #[test]
    fn normalize_removes_only_first_kommune_occurrence() {
        // The original removes a single occurrence; the second survives.
        assert_eq!(normalize("Kommune Kommune"), "kommune");
    }

    #[test]
    fn exact_match_wins_over_earlier_partial() {
        let data = dataset(&[("1", "Langeskov Øst"), ("2", "Langeskov")]);

        // "langeskov oest" contains the query and comes first, but the
        // exact match further down must win.
        let found = resolve("Langeskov", &data).expect("expected match");
        assert_eq!(found.kode, "2");
    }

    #[test]
    fn exact_match_short_circuits() {
        let data = dataset(&[("461", "Odense"), ("480", "Nordfyns")]);
        let found = resolve("Odense", &data).expect("expected match");
        assert_eq!(found.kode, "461");
    }

    #[test]
    fn first_partial_in_order_is_kept() {
        let data = dataset(&[("1", "Nyby"), ("2", "Storby")]);
        let found = resolve("by", &data).expect("expected match");
        assert_eq!(found.kode, "1");
    }

    #[test]
    fn kommune_suffix_in_query_still_matches() {
        let data = dataset(&[("751", "Aarhus")]);
        let found = resolve("aarhus kommune", &data).expect("expected match");
        assert_eq!(found.kode, "751");
    }

    #[test]
    fn no_match_returns_none() {
        let data = dataset(&[("461", "Odense"), ("480", "Nordfyns")]);
        assert!(resolve("Malmö", &data).is_none());
    }

    #[test]
    fn empty_query_returns_none() {
        let data = dataset(&[("461", "Odense")]);
        assert!(resolve("", &data).is_none());
        assert!(resolve("   ", &data).is_none());
    }
}
