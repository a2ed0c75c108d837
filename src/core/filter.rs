//! Filter & grouping engine - pure selection over in-memory listings.
//!
//! All functions here are stateless transforms over `Vec<ReceiptRow>`.
//! Filters compose by intersection, so the order they are applied in never
//! changes the result set. "Today" is always a parameter, never read from
//! the clock, so every computation is reproducible.

use crate::core::receipt::ReceiptRow;
use crate::core::status::effective_status;
use crate::entities::ReceiptStatus;
use chrono::{Datelike, Days, Months, NaiveDate};
use std::collections::HashSet;

/// A preset or explicit reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// Just the reference day
    Today,
    /// The reference day's calendar month
    ThisMonth,
    /// The month before the reference day's
    LastMonth,
    /// Explicit inclusive range
    Custom {
        /// First day of the range
        from: NaiveDate,
        /// Last day of the range
        to: NaiveDate,
    },
    /// The last N calendar months up to the reference day
    RollingMonths(u32),
}

impl DateWindow {
    /// Resolves the window to an inclusive `[from, to]` date range.
    #[must_use]
    pub fn bounds(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Today => (today, today),
            Self::ThisMonth => (first_of_month(today), last_of_month(today)),
            Self::LastMonth => {
                let last_day = first_of_month(today)
                    .checked_sub_days(Days::new(1))
                    .unwrap_or(today);
                (first_of_month(last_day), last_day)
            }
            Self::Custom { from, to } => (from, to),
            Self::RollingMonths(months) => (
                today
                    .checked_sub_months(Months::new(months))
                    .unwrap_or(today),
                today,
            ),
        }
    }
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(day.year(), day.month(), 1).unwrap_or(day)
}

fn last_of_month(day: NaiveDate) -> NaiveDate {
    first_of_month(day)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(day)
}

/// The date a receipt sorts and filters by: receipt date, else deposit
/// date, else the submission timestamp's date.
#[must_use]
pub fn effective_date(receipt: &crate::entities::receipt::Model) -> NaiveDate {
    receipt
        .receipt_date
        .or(receipt.deposit_date)
        .unwrap_or_else(|| receipt.created_at.date_naive())
}

/// Retains rows whose effective date falls inside `[from, to]` inclusive.
#[must_use]
pub fn filter_by_window(rows: Vec<ReceiptRow>, from: NaiveDate, to: NaiveDate) -> Vec<ReceiptRow> {
    rows.into_iter()
        .filter(|row| {
            let date = effective_date(&row.receipt);
            from <= date && date <= to
        })
        .collect()
}

/// Retains rows whose effective status is in `statuses`.
///
/// An empty set means "no filtering", not "nothing": it returns every row.
#[must_use]
pub fn filter_by_statuses(
    rows: Vec<ReceiptRow>,
    statuses: &HashSet<ReceiptStatus>,
) -> Vec<ReceiptRow> {
    if statuses.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| statuses.contains(&effective_status(&row.receipt)))
        .collect()
}

/// Retains rows matching a free-text query against the vendor name, stall
/// number, and market name. Case-insensitive substring match; an empty
/// (or all-whitespace) query returns every row.
#[must_use]
pub fn filter_by_text(rows: Vec<ReceiptRow>, query: &str) -> Vec<ReceiptRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| {
            row.vendor_name.to_lowercase().contains(&needle)
                || row
                    .stall_number
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
                || row
                    .market_name
                    .as_deref()
                    .is_some_and(|m| m.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Sorts newest first by effective date. The sort is stable, so rows
/// sharing a date keep their input (insertion) order.
pub fn sort_by_effective_date_desc(rows: &mut [ReceiptRow]) {
    rows.sort_by(|a, b| effective_date(&b.receipt).cmp(&effective_date(&a.receipt)));
}

/// The four lifecycle buckets of a listing.
///
/// Empty buckets stay in the structure; whether to render them is the
/// view's call.
#[derive(Debug, Clone, Default)]
pub struct StatusGroups {
    /// Rows whose effective status is `Uploaded`
    pub uploaded: Vec<ReceiptRow>,
    /// Rows whose effective status is `Requested`
    pub requested: Vec<ReceiptRow>,
    /// Rows whose effective status is `NeedsFix`
    pub needs_fix: Vec<ReceiptRow>,
    /// Rows whose effective status is `Completed`
    pub completed: Vec<ReceiptRow>,
}

impl StatusGroups {
    /// The bucket for a given status.
    #[must_use]
    pub fn bucket(&self, status: ReceiptStatus) -> &[ReceiptRow] {
        match status {
            ReceiptStatus::Uploaded => &self.uploaded,
            ReceiptStatus::Requested => &self.requested,
            ReceiptStatus::NeedsFix => &self.needs_fix,
            ReceiptStatus::Completed => &self.completed,
        }
    }

    /// Total rows across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.uploaded.len() + self.requested.len() + self.needs_fix.len() + self.completed.len()
    }

    /// True when every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions rows into status buckets by effective status, preserving the
/// input order inside each bucket.
#[must_use]
pub fn group_by_status(rows: Vec<ReceiptRow>) -> StatusGroups {
    let mut groups = StatusGroups::default();
    for row in rows {
        match effective_status(&row.receipt) {
            ReceiptStatus::Uploaded => groups.uploaded.push(row),
            ReceiptStatus::Requested => groups.requested.push(row),
            ReceiptStatus::NeedsFix => groups.needs_fix.push(row),
            ReceiptStatus::Completed => groups.completed.push(row),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::ReceiptKind;
    use crate::test_utils::{sample_receipt, sample_row};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row_with_date(id: i64, day: NaiveDate) -> ReceiptRow {
        let mut row = sample_row(id, "Kim's Produce");
        row.receipt.receipt_date = Some(day);
        row
    }

    fn ids(rows: &[ReceiptRow]) -> Vec<i64> {
        rows.iter().map(|r| r.receipt.id).collect()
    }

    #[test]
    fn test_window_bounds_today() {
        let today = date(2025, 3, 15);
        assert_eq!(DateWindow::Today.bounds(today), (today, today));
    }

    #[test]
    fn test_window_bounds_this_month() {
        let today = date(2025, 3, 15);
        assert_eq!(
            DateWindow::ThisMonth.bounds(today),
            (date(2025, 3, 1), date(2025, 3, 31))
        );
        // February, non-leap
        assert_eq!(
            DateWindow::ThisMonth.bounds(date(2025, 2, 10)),
            (date(2025, 2, 1), date(2025, 2, 28))
        );
    }

    #[test]
    fn test_window_bounds_last_month_crosses_year() {
        assert_eq!(
            DateWindow::LastMonth.bounds(date(2025, 1, 15)),
            (date(2024, 12, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn test_window_bounds_rolling_months() {
        assert_eq!(
            DateWindow::RollingMonths(3).bounds(date(2025, 3, 15)),
            (date(2024, 12, 15), date(2025, 3, 15))
        );
    }

    #[test]
    fn test_effective_date_priority() {
        let mut receipt = sample_receipt(1);
        receipt.receipt_date = Some(date(2025, 3, 5));
        receipt.deposit_date = Some(date(2025, 3, 7));
        assert_eq!(effective_date(&receipt), date(2025, 3, 5));

        receipt.receipt_date = None;
        assert_eq!(effective_date(&receipt), date(2025, 3, 7));

        receipt.deposit_date = None;
        assert_eq!(effective_date(&receipt), receipt.created_at.date_naive());
    }

    #[test]
    fn test_filter_by_window_inclusive() {
        let rows = vec![
            row_with_date(1, date(2025, 3, 1)),
            row_with_date(2, date(2025, 3, 15)),
            row_with_date(3, date(2025, 3, 31)),
            row_with_date(4, date(2025, 4, 1)),
        ];
        let kept = filter_by_window(rows, date(2025, 3, 1), date(2025, 3, 31));
        assert_eq!(ids(&kept), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_status_set_means_all() {
        let statuses = [
            ReceiptStatus::Uploaded,
            ReceiptStatus::Requested,
            ReceiptStatus::NeedsFix,
            ReceiptStatus::Completed,
        ];
        let rows: Vec<ReceiptRow> = (0..10)
            .map(|i| {
                let mut row = sample_row(i, "Kim's Produce");
                row.receipt.status = statuses[usize::try_from(i).unwrap() % 4];
                row
            })
            .collect();
        let before = ids(&rows);

        let kept = filter_by_statuses(rows, &HashSet::new());
        assert_eq!(ids(&kept), before);
    }

    #[test]
    fn test_status_filter_uses_effective_status() {
        let mut simple = sample_row(1, "Kim's Produce");
        simple.receipt.receipt_type = ReceiptKind::Simple;
        simple.receipt.status = ReceiptStatus::Uploaded;

        let mut completed_only = HashSet::new();
        completed_only.insert(ReceiptStatus::Completed);

        let kept = filter_by_statuses(vec![simple], &completed_only);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_text_filter_matches_all_fields() {
        let mut a = sample_row(1, "Kim's Produce");
        a.stall_number = Some("B-12".to_string());
        let mut b = sample_row(2, "Lee Fishmongers");
        b.market_name = Some("Central Market".to_string());
        let c = sample_row(3, "Quiet Stall");

        let rows = vec![a, b, c];
        assert_eq!(ids(&filter_by_text(rows.clone(), "  kim ")), vec![1]);
        assert_eq!(ids(&filter_by_text(rows.clone(), "b-12")), vec![1]);
        assert_eq!(ids(&filter_by_text(rows.clone(), "CENTRAL")), vec![2]);
        assert_eq!(ids(&filter_by_text(rows.clone(), "")), vec![1, 2, 3]);
        assert!(filter_by_text(rows, "nowhere").is_empty());
    }

    #[test]
    fn test_filters_commute() {
        let statuses = [
            ReceiptStatus::Uploaded,
            ReceiptStatus::Requested,
            ReceiptStatus::NeedsFix,
        ];
        let names = ["Kim's Produce", "Lee Fishmongers", "Quiet Stall"];
        let rows: Vec<ReceiptRow> = (0..18)
            .map(|i| {
                let idx = usize::try_from(i).unwrap();
                let mut row = sample_row(i, names[idx % 3]);
                row.receipt.status = statuses[idx % 3];
                row.receipt.receipt_date =
                    Some(date(2025, 3, 1 + (u32::try_from(idx).unwrap() % 20)));
                row
            })
            .collect();

        let mut wanted = HashSet::new();
        wanted.insert(ReceiptStatus::Uploaded);
        wanted.insert(ReceiptStatus::NeedsFix);
        let from = date(2025, 3, 4);
        let to = date(2025, 3, 14);

        let status_then_date_then_text = filter_by_text(
            filter_by_window(filter_by_statuses(rows.clone(), &wanted), from, to),
            "kim",
        );
        let text_then_status_then_date = filter_by_window(
            filter_by_statuses(filter_by_text(rows.clone(), "kim"), &wanted),
            from,
            to,
        );
        let date_then_text_then_status = filter_by_statuses(
            filter_by_text(filter_by_window(rows, from, to), "kim"),
            &wanted,
        );

        assert_eq!(ids(&status_then_date_then_text), ids(&text_then_status_then_date));
        assert_eq!(ids(&status_then_date_then_text), ids(&date_then_text_then_status));
    }

    #[test]
    fn test_sort_desc_is_stable_on_ties() {
        let mut rows = vec![
            row_with_date(1, date(2025, 3, 10)),
            row_with_date(2, date(2025, 3, 20)),
            row_with_date(3, date(2025, 3, 10)),
        ];
        sort_by_effective_date_desc(&mut rows);
        // Ties (1 and 3) keep their insertion order
        assert_eq!(ids(&rows), vec![2, 1, 3]);
    }

    #[test]
    fn test_group_by_status_keeps_order_and_empty_buckets() {
        let mut a = sample_row(1, "Kim's Produce");
        a.receipt.status = ReceiptStatus::Requested;
        let mut b = sample_row(2, "Kim's Produce");
        b.receipt.status = ReceiptStatus::Requested;
        let mut c = sample_row(3, "Kim's Produce");
        c.receipt.receipt_type = ReceiptKind::Simple;
        c.receipt.status = ReceiptStatus::Uploaded; // effectively completed

        let groups = group_by_status(vec![a, b, c]);
        assert_eq!(ids(&groups.requested), vec![1, 2]);
        assert_eq!(ids(&groups.completed), vec![3]);
        assert!(groups.uploaded.is_empty());
        assert!(groups.needs_fix.is_empty());
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.bucket(ReceiptStatus::Requested).len(), 2);
    }
}
