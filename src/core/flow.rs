use crate::core::display;
use crate::core::matcher;
use crate::core::session::TurnoutSession;
use crate::domain::model::TurnoutReport;
use crate::domain::ports::TurnoutSource;
use crate::utils::error::{LookupError, Result};

/// The lookup flow: load once, resolve the query, build the report.
///
/// This is the single boundary the caller talks to; every failure comes
/// back as a `LookupError` and nothing escapes it.
pub struct LookupFlow<S: TurnoutSource> {
    source: S,
    session: TurnoutSession,
}

impl<S: TurnoutSource> LookupFlow<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            session: TurnoutSession::new(),
        }
    }

    pub async fn lookup(&mut self, query: &str) -> Result<TurnoutReport> {
        self.session.ensure_loaded(&self.source).await?;

        let datasets = self
            .session
            .datasets()
            .ok_or_else(|| LookupError::Processing {
                message: "datasets unavailable after load".to_string(),
            })?;

        tracing::debug!(query, "resolving municipality");
        let municipality =
            matcher::resolve(query, &datasets.live).ok_or(LookupError::NoMatch)?;
        tracing::debug!(kode = %municipality.kode, navn = %municipality.record.navn, "matched");

        Ok(display::turnout_report(
            &municipality,
            &datasets.reference,
            &datasets.live.timestamp,
        ))
    }
}
