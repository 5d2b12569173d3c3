use std::sync::Arc;

use econcal_core::{
    normalize, CalendarDate, DateWindow, FredClient, HttpClient, NormalizeOptions, ProxyChain,
    RangePreset, DEFAULT_DAYS_AFTER, DEFAULT_DAYS_BEFORE,
};
use serde_json::json;
use time::OffsetDateTime;

use crate::cli::CalendarArgs;
use crate::error::CliError;
use crate::session::SessionStore;

use super::CommandResult;

pub async fn run(
    args: &CalendarArgs,
    client: Arc<dyn HttpClient>,
    mock: bool,
) -> Result<CommandResult, CliError> {
    let today = match &args.date {
        Some(raw) => raw.parse::<CalendarDate>()?,
        None => CalendarDate::from_date(OffsetDateTime::now_utc().date()),
    };

    // A preset fills in whichever of before/after the caller left unset;
    // explicit day counts win over the preset.
    let (mut before, mut after) = (args.before, args.after);
    if let Some(raw) = &args.range {
        let preset: RangePreset = raw.parse()?;
        let (preset_before, preset_after) = preset.days(today);
        before = before.or(Some(preset_before));
        after = after.or(Some(preset_after));
    }
    let window = DateWindow::around(
        today,
        before.unwrap_or(DEFAULT_DAYS_BEFORE),
        after.unwrap_or(DEFAULT_DAYS_AFTER),
    );

    let store = SessionStore::from_env();
    let major_only = args
        .major_only
        .or_else(|| store.major_only())
        .unwrap_or(false);
    let session_warning = store
        .set_major_only(major_only)
        .err()
        .map(|error| format!("session store write failed: {error}"));

    let api_key = match &args.api_key {
        Some(key) => key.clone(),
        None if mock => String::from("mock"),
        None => {
            return Err(CliError::Command(String::from(
                "FRED_API_KEY is required unless --mock is set",
            )))
        }
    };

    let fred = FredClient::new(ProxyChain::new(client), api_key)?;
    let options = NormalizeOptions { major_only };

    let mut result = match fred.calendar(&window).await {
        Ok(success) => {
            let records = normalize(&success.releases, &options);
            let data = json!({
                "today": today,
                "window": { "start": window.start, "end": window.end },
                "major_only": major_only,
                "records": records,
            });

            CommandResult::ok(data, success.proxy_chain)
                .with_errors(success.errors)
                .with_warnings(success.warnings)
                .with_latency(success.latency_ms)
        }
        Err(failure) => {
            // Fetch failure degrades to an empty calendar; the renderer
            // shows the no-data message and the errors ride the envelope.
            let data = json!({
                "today": today,
                "window": { "start": window.start, "end": window.end },
                "major_only": major_only,
                "records": [],
            });

            CommandResult::ok(data, failure.proxy_chain)
                .with_errors(failure.errors)
                .with_warnings(failure.warnings)
                .with_latency(failure.latency_ms)
        }
    };

    if let Some(warning) = session_warning {
        result = result.with_warning(warning);
    }
    Ok(result)
}
