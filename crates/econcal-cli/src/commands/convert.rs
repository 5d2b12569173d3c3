use econcal_core::{eastern_to_japan, is_us_dst, CalendarDate, ClockTime, ProxyId};
use serde_json::json;

use crate::cli::ConvertArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &ConvertArgs) -> Result<CommandResult, CliError> {
    let date: CalendarDate = args.date.parse()?;
    let time: ClockTime = args.time.parse()?;

    let dst = is_us_dst(date);
    let moment = eastern_to_japan(date, time);

    let data = json!({
        "eastern": { "date": date, "time": time, "dst": dst },
        "japan": { "date": moment.date, "time": moment.time },
    });

    Ok(CommandResult::ok(data, ProxyId::ALL.to_vec()))
}
