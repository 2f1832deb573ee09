//! Text and JSON rendering of a [`ScheduleView`].

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::info;

use crate::schedule::{Group, ScheduleView};

/// Zone the transit system publishes its timetables in.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Moscow;

const TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Formats a timestamp in the transit system's local time.
pub fn format_time(ts: &DateTime<Utc>, tz: Tz) -> String {
    ts.with_timezone(&tz).format(TIME_FORMAT).to_string()
}

/// Renders the schedule as a multi-line text block.
pub fn render_text(view: &ScheduleView, tz: Tz) -> String {
    let mut out = String::new();
    out.push_str(&format!("Stop: {}\n", view.stop_name));

    for route in &view.routes {
        out.push_str(&format!("  Route: {}\n", route.route_name));
        if route.is_empty() {
            out.push_str("    no upcoming departures\n");
        }
        write_groups(&mut out, &route.estimated, "estimated arrival", tz);
        write_groups(&mut out, &route.scheduled, "scheduled arrival", tz);
    }

    out
}

fn write_groups(out: &mut String, groups: &[Group], label: &str, tz: Tz) {
    for (j, group) in groups.iter().enumerate() {
        // index labels only disambiguate when a route has several runs
        if groups.len() > 1 && !group.is_empty() {
            out.push_str(&format!("    Schedule #{j}:\n"));
        }
        for ts in group {
            out.push_str(&format!("    {label}: {}\n", format_time(ts, tz)));
        }
    }
}

/// Logs the rendered schedule.
pub fn print_text(view: &ScheduleView, tz: Tz) {
    info!("\n{}", render_text(view, tz));
}

/// Logs the schedule as pretty-printed JSON.
pub fn print_json(view: &ScheduleView) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}
