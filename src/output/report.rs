//! Text rendering for the aggregate and per-sample reports.

use crate::aggregator::GroupTotals;
use chrono::TimeDelta;

const MICROS_PER_SECOND: i128 = 1_000_000;
const MICROS_PER_DAY: i128 = 86_400 * MICROS_PER_SECOND;

/// How durations are written in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationStyle {
    /// `1 day, 2:03:04.500000`
    #[default]
    Human,
    /// `93784.500000`
    Seconds,
}

impl DurationStyle {
    pub fn format(self, duration: TimeDelta) -> String {
        match self {
            DurationStyle::Human => format_duration(duration),
            DurationStyle::Seconds => format_seconds(duration),
        }
    }
}

/// Whole microseconds in a duration; sub-microsecond precision is dropped
pub fn total_microseconds(duration: TimeDelta) -> i128 {
    duration.num_seconds() as i128 * MICROS_PER_SECOND + (duration.subsec_nanos() / 1_000) as i128
}

/// Render a duration as `[D day[s], ]H:MM:SS[.ffffff]`
///
/// Hours never exceed 23; whole days are split out. The fraction is only
/// shown when non-zero. Negative durations keep a negative day count with
/// a positive clock part (`-1 day, 23:59:59`).
pub fn format_duration(duration: TimeDelta) -> String {
    let micros = total_microseconds(duration);
    let days = micros.div_euclid(MICROS_PER_DAY);
    let rem = micros.rem_euclid(MICROS_PER_DAY);

    let fraction = rem % MICROS_PER_SECOND;
    let seconds = rem / MICROS_PER_SECOND;
    let clock = format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    );
    let clock = if fraction != 0 {
        format!("{}.{:06}", clock, fraction)
    } else {
        clock
    };

    match days {
        0 => clock,
        1 | -1 => format!("{} day, {}", days, clock),
        _ => format!("{} days, {}", days, clock),
    }
}

/// Render a duration as decimal seconds with microsecond precision
pub fn format_seconds(duration: TimeDelta) -> String {
    let micros = total_microseconds(duration);
    let sign = if micros < 0 { "-" } else { "" };
    let micros = micros.abs();
    format!(
        "{}{}.{:06}",
        sign,
        micros / MICROS_PER_SECOND,
        micros % MICROS_PER_SECOND
    )
}

/// Render the aggregate report
///
/// One `STATUS: <duration> (<n> intervals)` line per status, in the order
/// the statuses were first seen, then a `Total:` line.
pub fn aggregate_report(totals: &GroupTotals) -> String {
    let mut lines: Vec<String> = totals
        .groups
        .iter()
        .map(|group| {
            format!(
                "{}: {} ({} intervals)",
                group.key,
                format_duration(group.duration),
                group.intervals
            )
        })
        .collect();

    lines.push(format!(
        "Total: {} ({} intervals)",
        format_duration(totals.total),
        totals.total_intervals
    ));

    lines.join("\n")
}

/// Render the per-sample report, one `SAMPLE: <duration>` line each
///
/// Lines follow the order of `ranked`.
pub fn sample_report(ranked: &[(String, TimeDelta)], style: DurationStyle) -> String {
    ranked
        .iter()
        .map(|(sample, duration)| format!("{}: {}", sample, style.format(*duration)))
        .collect::<Vec<_>>()
        .join("\n")
}
