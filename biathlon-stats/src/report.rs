//! Renders the final result table: one line per competitor, sorted
//! ascending by the rendered `Result` field. Grounded on
//! `internal/statistics/result.go`'s `Result.String()` for the exact
//! textual layout (brace-wrapped lap/penalty cells, `{,}` for an unclosed
//! one, the trailing `hits/shots` suffix) and on the reference
//! `GetResults`'s "collect, sort by rendered string, return" shape.

use std::fmt;

use biathlon_model::TimedInterval;

use crate::aggregator::CompetitorStats;

/// A single rendered result-table row, already detached from the mutable
/// aggregate it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub result: String,
    pub competitor_id: u32,
    pub laps: Vec<TimedInterval>,
    pub penalties: Vec<TimedInterval>,
    pub total_hits: u32,
    pub total_shots: u32,
}

impl ResultRow {
    fn from_stats(stats: &CompetitorStats) -> Self {
        let result = match stats.total_time_secs() {
            Some(secs) => format_duration_secs(secs),
            None => stats
                .classification
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| "NotStarted".to_string()),
        };
        Self {
            result,
            competitor_id: stats.id,
            laps: stats.laps.clone(),
            penalties: stats.penalties.clone(),
            total_hits: stats.total_hits,
            total_shots: stats.total_shots,
        }
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ", self.result, self.competitor_id)?;

        write!(f, "[")?;
        for (i, lap) in self.laps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_cell(f, lap)?;
        }
        write!(f, "]")?;

        if !self.penalties.is_empty() {
            write!(f, " [")?;
            for (i, penalty) in self.penalties.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_cell(f, penalty)?;
            }
            write!(f, "]")?;
        }

        write!(f, " {}/{}", self.total_hits, self.total_shots)
    }
}

fn write_cell(f: &mut fmt::Formatter<'_>, interval: &TimedInterval) -> fmt::Result {
    match (interval.duration_secs, interval.avg_speed) {
        (Some(duration), Some(avg_speed)) => {
            write!(f, "{{{}, {:.3}}}", format_duration_secs(duration), avg_speed)
        }
        _ => write!(f, "{{,}}"),
    }
}

/// Formats a duration given in seconds as `HH:MM:SS.sss`.
pub fn format_duration_secs(total_secs: f64) -> String {
    let total_millis = (total_secs * 1000.0).round() as i64;
    let millis = total_millis % 1000;
    let total_secs = total_millis / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;
    format!("{hours:02}:{mins:02}:{secs:02}.{millis:03}")
}

/// Builds the final result table: one row per competitor, sorted ascending
/// by the rendered `Result` string.
pub fn build_report(stats: &[CompetitorStats]) -> Vec<ResultRow> {
    let mut rows: Vec<ResultRow> = stats.iter().map(ResultRow::from_stats).collect();
    rows.sort_by(|a, b| a.result.cmp(&b.result));
    rows
}
