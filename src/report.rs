//! Report generation for balancing runs.

use std::fmt::Write;

use serde::Serialize;

use crate::item::Weighted;
use crate::leveling::LevelingSummary;
use crate::partition::Partition;
use crate::stats::{average_total, spread, standard_deviation};

#[derive(Debug, Clone, Serialize)]
pub struct GroupingReport {
    pub label: String,
    pub group_count: usize,
    pub sample_len: usize,
    pub average_total: f64,
    pub standard_deviation: f64,
    pub spread: f64,
    /// Deviation of the greedy partition before leveling, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greedy_standard_deviation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leveling: Option<LevelingSummary>,
    pub groups: Vec<ReportGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportGroup {
    pub total: f64,
    pub members: Vec<ReportMember>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMember {
    /// Caller tag when the item has one, otherwise its position in the sample.
    pub index: usize,
    pub metric: f64,
}

pub fn build_report<T: Weighted>(label: &str, partition: &Partition<'_, T>) -> GroupingReport {
    let items = partition.items();
    let totals = partition.totals();
    let groups = partition
        .groups()
        .iter()
        .zip(&totals)
        .map(|(group, &total)| ReportGroup {
            total,
            members: group
                .members()
                .iter()
                .map(|id| {
                    let item = &items[id.get()];
                    ReportMember {
                        index: item.tag().unwrap_or(id.get()),
                        metric: item.metric(),
                    }
                })
                .collect(),
        })
        .collect();

    GroupingReport {
        label: label.to_string(),
        group_count: partition.group_count(),
        sample_len: items.len(),
        average_total: average_total(&totals),
        standard_deviation: standard_deviation(&totals),
        spread: spread(&totals),
        greedy_standard_deviation: None,
        leveling: None,
        groups,
    }
}

impl GroupingReport {
    pub fn with_greedy_baseline(mut self, greedy_totals: &[f64]) -> Self {
        self.greedy_standard_deviation = Some(standard_deviation(greedy_totals));
        self
    }

    pub fn with_leveling(mut self, summary: LevelingSummary) -> Self {
        self.leveling = Some(summary);
        self
    }
}

pub fn render_text(report: &GroupingReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.label);
    let _ = writeln!(out, "  Group count: {}", report.group_count);
    let _ = writeln!(out, "  Sample length: {}", report.sample_len);
    let _ = writeln!(out, "  Group average total: {}", report.average_total);
    if let Some(greedy) = report.greedy_standard_deviation {
        let _ = writeln!(out, "  Greedy total standard deviation: {greedy}");
    }
    let _ = writeln!(
        out,
        "  Group total standard deviation: {}",
        report.standard_deviation
    );
    let _ = writeln!(out, "  Group total spread: {}", report.spread);
    if let Some(leveling) = &report.leveling {
        let _ = writeln!(
            out,
            "  Leveling: {} pairs, {} rounds, {} swaps",
            leveling.pairs_visited, leveling.rounds, leveling.swaps
        );
    }
    let _ = writeln!(out);

    for (idx, group) in report.groups.iter().enumerate() {
        let _ = writeln!(out, "  Group #{} {}", idx + 1, group.total);
        let members = group
            .members
            .iter()
            .map(|m| format!("{}({})", m.index, m.metric))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "    Members ({}): {}", group.members.len(), members);
    }
    out
}
