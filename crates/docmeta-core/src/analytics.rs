//! Dashboard report views.
//!
//! [`build_report`] turns a record collection into the five views shown on
//! the visualization page plus collection totals. Each view is a plain list
//! of `(label, value)` entries with no charting concerns attached, so the
//! same report can be rendered as a table, a chart, or JSON.
//!
//! | View | Grouping | Value | Order |
//! |------|----------|-------|-------|
//! | file types | type before `;` | summed size | descending, all groups |
//! | top projects | trimmed project or `(none)` | summed size | descending, top N |
//! | top contractors | trimmed contractor or `(none)` | summed size | descending, top N |
//! | top words | description tokens | occurrences | descending, top N |
//! | modified timeline | calendar day | records | ascending by day |

use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_sum, count_by, GroupTotals};
use crate::models::{DocumentRecord, GroupKey};
use crate::rank::{rank_all, top_n};
use crate::timeline::bucket_by_day;
use crate::tokenize::tokenize;

pub const DEFAULT_TOP_N: usize = 5;

/// One `(label, value)` pair of a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEntry {
    pub label: String,
    pub value: u64,
}

/// An ordered sequence of labelled values. Labels are unique within a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportView {
    pub title: String,
    /// What `value` measures, e.g. "Bytes" or "Frequency".
    pub measure: String,
    pub entries: Vec<ViewEntry>,
}

impl ReportView {
    pub fn new<L: Into<String>>(
        title: impl Into<String>,
        measure: impl Into<String>,
        entries: impl IntoIterator<Item = (L, u64)>,
    ) -> Self {
        Self {
            title: title.into(),
            measure: measure.into(),
            entries: entries
                .into_iter()
                .map(|(label, value)| ViewEntry {
                    label: label.into(),
                    value,
                })
                .collect(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tuning for [`build_report`].
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Entries kept in each ranked view.
    pub top_n: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// All dashboard views for one record collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub total_files: usize,
    pub total_size: u64,
    pub file_types: ReportView,
    pub top_projects: ReportView,
    pub top_contractors: ReportView,
    pub top_words: ReportView,
    pub modified_timeline: ReportView,
}

impl AnalyticsReport {
    /// Views in dashboard order.
    pub fn views(&self) -> [&ReportView; 5] {
        [
            &self.file_types,
            &self.top_projects,
            &self.top_contractors,
            &self.top_words,
            &self.modified_timeline,
        ]
    }
}

pub fn total_size(records: &[DocumentRecord]) -> u64 {
    records
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.size()))
}

pub fn file_type_sizes(records: &[DocumentRecord]) -> GroupTotals<GroupKey> {
    aggregate_sum(records, |r| r.file_type_key(), |r| r.size())
}

pub fn project_sizes(records: &[DocumentRecord]) -> GroupTotals<GroupKey> {
    aggregate_sum(records, |r| r.project_key(), |r| r.size())
}

pub fn contractor_sizes(records: &[DocumentRecord]) -> GroupTotals<GroupKey> {
    aggregate_sum(records, |r| r.contractor_key(), |r| r.size())
}

/// Token occurrences across every record's description.
pub fn word_counts(records: &[DocumentRecord]) -> GroupTotals<String> {
    count_by(
        records.iter().flat_map(|r| tokenize(&r.description)),
        |word| word.clone(),
    )
}

fn labelled(entries: Vec<(GroupKey, u64)>) -> Vec<(String, u64)> {
    entries
        .into_iter()
        .map(|(key, value)| (key.label().to_string(), value))
        .collect()
}

/// Build every dashboard view. Deterministic for identical input.
pub fn build_report(records: &[DocumentRecord], options: &ReportOptions) -> AnalyticsReport {
    let n = options.top_n;

    AnalyticsReport {
        total_files: records.len(),
        total_size: total_size(records),
        file_types: ReportView::new(
            "File Types by Size",
            "Bytes",
            labelled(rank_all(&file_type_sizes(records))),
        ),
        top_projects: ReportView::new(
            format!("Top {} Projects (by size)", n),
            "Total Size (bytes)",
            labelled(top_n(&project_sizes(records), n)),
        ),
        top_contractors: ReportView::new(
            format!("Top {} Contractors (by size)", n),
            "Total Size (bytes)",
            labelled(top_n(&contractor_sizes(records), n)),
        ),
        top_words: ReportView::new(
            format!("Top {} Descriptive Words", n),
            "Frequency",
            top_n(&word_counts(records), n),
        ),
        modified_timeline: ReportView::new(
            "Files Modified Timeline",
            "Files Modified per Day",
            bucket_by_day(records, |r| r.modified()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(
        file_type: &str,
        project: &str,
        contractor: &str,
        description: &str,
        modified_at: Option<&str>,
        size: Option<u64>,
    ) -> DocumentRecord {
        DocumentRecord {
            file_type: file_type.to_string(),
            project: project.to_string(),
            contractor: contractor.to_string(),
            description: description.to_string(),
            modified_at: modified_at.map(str::to_string),
            size_bytes: size,
            ..Default::default()
        }
    }

    fn corpus() -> Vec<DocumentRecord> {
        vec![
            doc(
                "application/pdf",
                "Harbor",
                "Acme",
                "Bridge inspection report",
                Some("2024-01-05T10:00:00Z"),
                Some(500),
            ),
            doc(
                "text/plain; charset=utf-8",
                "",
                "Acme",
                "Inspection notes for the bridge",
                Some("2024-01-05T23:00:00Z"),
                Some(50),
            ),
            doc(
                "text/plain",
                "Harbor",
                "",
                "Budget report",
                Some("2024-01-03T08:00:00Z"),
                None,
            ),
            doc("", "Tunnel", "Beta Corp", "", None, Some(700)),
            doc(
                "image/png",
                "  ",
                "Beta Corp",
                "Site photo of the bridge",
                Some("2024-02-11T12:00:00Z"),
                Some(300),
            ),
        ]
    }

    #[test]
    fn test_totals() {
        let report = build_report(&corpus(), &ReportOptions::default());
        assert_eq!(report.total_files, 5);
        assert_eq!(report.total_size, 1550);
    }

    #[test]
    fn test_file_type_view() {
        let report = build_report(&corpus(), &ReportOptions::default());
        assert_eq!(
            report.file_types.labels(),
            vec!["unknown", "application/pdf", "image/png", "text/plain"]
        );
        assert_eq!(report.file_types.values(), vec![700, 500, 300, 50]);
        assert_eq!(report.file_types.measure, "Bytes");
    }

    #[test]
    fn test_project_and_contractor_views() {
        let report = build_report(&corpus(), &ReportOptions::default());
        assert_eq!(report.top_projects.labels(), vec!["Tunnel", "Harbor", "(none)"]);
        assert_eq!(report.top_projects.values(), vec![700, 500, 350]);
        assert_eq!(
            report.top_contractors.labels(),
            vec!["Beta Corp", "Acme", "(none)"]
        );
        assert_eq!(report.top_contractors.values(), vec![1000, 550, 0]);
        assert_eq!(report.top_projects.title, "Top 5 Projects (by size)");
    }

    #[test]
    fn test_word_view() {
        let report = build_report(&corpus(), &ReportOptions { top_n: 3 });
        assert_eq!(report.top_words.labels(), vec!["bridge", "inspection", "report"]);
        assert_eq!(report.top_words.values(), vec![3, 2, 2]);
        assert_eq!(report.top_words.title, "Top 3 Descriptive Words");
    }

    #[test]
    fn test_timeline_view() {
        let report = build_report(&corpus(), &ReportOptions::default());
        assert_eq!(
            report.modified_timeline.labels(),
            vec!["2024-01-03", "2024-01-05", "2024-02-11"]
        );
        assert_eq!(report.modified_timeline.values(), vec![1, 2, 1]);
    }

    #[test]
    fn test_empty_collection() {
        let report = build_report(&[], &ReportOptions::default());
        assert_eq!(report.total_files, 0);
        assert_eq!(report.total_size, 0);
        assert!(report.views().iter().all(|v| v.is_empty()));
    }

    #[test]
    fn test_top_n_zero_empties_ranked_views() {
        let report = build_report(&corpus(), &ReportOptions { top_n: 0 });
        assert!(report.top_projects.is_empty());
        assert!(report.top_words.is_empty());
        assert!(!report.file_types.is_empty());
        assert!(!report.modified_timeline.is_empty());
    }

    #[test]
    fn test_report_deterministic() {
        let records = corpus();
        let options = ReportOptions::default();
        assert_eq!(build_report(&records, &options), build_report(&records, &options));
    }

    #[test]
    fn test_labels_unique() {
        let mut records = corpus();
        records.push(doc("text/plain", "(none)", "", "", None, Some(1)));
        let report = build_report(&records, &ReportOptions { top_n: 10 });
        for view in report.views() {
            let mut labels = view.labels();
            labels.sort();
            labels.dedup();
            assert_eq!(labels.len(), view.entries.len(), "duplicate label in {}", view.title);
        }
    }
}
