use crate::domain::model::{Municipality, ReferenceDataset, TurnoutReport};

/// Round to one decimal place, the precision turnout percentages are
/// published with.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Join a matched municipality against the reference dataset and compute
/// the percentage-point difference.
///
/// A missing reference entry means the reference turnout is unknown, never
/// an error. The diff is only present when both numbers are.
pub fn turnout_report(
    municipality: &Municipality,
    reference: &ReferenceDataset,
    timestamp: &str,
) -> TurnoutReport {
    let before = reference
        .get(&municipality.kode)
        .and_then(|entry| entry.stemmeprocent);
    let now = municipality.record.stemmeprocent;

    let diff = match (now, before) {
        (Some(now), Some(before)) if now.is_finite() && before.is_finite() => {
            Some(round1(now - before))
        }
        _ => None,
    };

    TurnoutReport {
        navn: format!("{} Kommune", municipality.record.navn),
        current: now,
        reference: before,
        diff,
        timestamp: timestamp.to_string(),
    }
}

impl TurnoutReport {
    /// Render the success payload for the terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.navn);
        out.push('\n');
        out.push_str(&format!("Current turnout today: {} %\n", fmt_pct(self.current)));
        out.push_str(&format!(
            "At the 2021 local election: {} %\n",
            fmt_pct(self.reference)
        ));
        if let Some(diff) = self.diff {
            out.push_str(&format!("Difference in percentage points: {:.1}\n", diff));
        }
        out.push_str(&format!("Last updated: {}", self.timestamp));
        out
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "unknown".to_string(),
    }
}
