use econcal_core::{CalendarDate, Envelope, Importance};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

const JA_WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(envelope)?,
    }

    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<(), CliError> {
    println!("request_id  : {}", envelope.meta.request_id);
    println!("generated_at: {}", envelope.meta.generated_at);
    println!(
        "proxies     : {}",
        envelope
            .meta
            .proxy_chain
            .iter()
            .map(|proxy| proxy.as_str())
            .collect::<Vec<_>>()
            .join(",")
    );
    println!("latency_ms  : {}", envelope.meta.latency_ms);

    if !envelope.meta.warnings.is_empty() {
        println!("warnings:");
        for warning in &envelope.meta.warnings {
            println!("  - {warning}");
        }
    }

    match envelope.data.get("records").and_then(Value::as_array) {
        Some(records) => render_calendar(records, anchor_date(&envelope.data)),
        None => {
            println!("data:");
            let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
            for line in pretty_data.lines() {
                println!("  {line}");
            }
        }
    }

    if !envelope.errors.is_empty() {
        println!("errors:");
        for error in &envelope.errors {
            println!("  - {}: {}", error.code, error.message);
        }
    }

    Ok(())
}

fn anchor_date(data: &Value) -> Option<CalendarDate> {
    data.get("today")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse().ok())
}

fn render_calendar(records: &[Value], today: Option<CalendarDate>) {
    if records.is_empty() {
        println!("データが見つかりませんでした");
        return;
    }

    for record in records {
        let date = record
            .get("date")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<CalendarDate>().ok());
        let label = match date {
            Some(date) => day_label(date, today),
            None => String::from("-"),
        };
        let time = record
            .get("time")
            .and_then(Value::as_str)
            .unwrap_or("--:--");
        let currency = record.get("currency").and_then(Value::as_str).unwrap_or("-");
        let stars = record
            .get("importance")
            .and_then(Value::as_u64)
            .and_then(|tier| Importance::from_tier(tier as u8).ok())
            .map(Importance::stars)
            .unwrap_or_else(|| String::from("-"));
        let indicator = record.get("indicator").and_then(Value::as_str).unwrap_or("-");

        println!("{label:<12} {time:<6} {currency:<4} {stars} {indicator}");
    }
}

/// Relative Japanese day label against the anchor date, otherwise
/// `M/D（曜）`.
fn day_label(date: CalendarDate, today: Option<CalendarDate>) -> String {
    if let Some(today) = today {
        if date == today {
            return String::from("今日");
        }
        if date == today.offset_days(1) {
            return String::from("明日");
        }
        if date == today.offset_days(-1) {
            return String::from("昨日");
        }
    }

    let weekday = JA_WEEKDAYS[usize::from(date.into_inner().weekday().number_days_from_sunday())];
    format!("{}/{}（{}）", date.month(), date.day(), weekday)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> CalendarDate {
        raw.parse().expect("valid test date")
    }

    #[test]
    fn relative_labels_surround_the_anchor() {
        let today = Some(date("2025-08-06"));
        assert_eq!(day_label(date("2025-08-06"), today), "今日");
        assert_eq!(day_label(date("2025-08-07"), today), "明日");
        assert_eq!(day_label(date("2025-08-05"), today), "昨日");
    }

    #[test]
    fn distant_dates_show_month_day_and_weekday() {
        // 2025-08-13 is a Wednesday.
        assert_eq!(day_label(date("2025-08-13"), Some(date("2025-08-06"))), "8/13（水）");
        assert_eq!(day_label(date("2025-08-13"), None), "8/13（水）");
    }
}
