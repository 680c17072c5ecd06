//! Search, type and date-range filters, plus pagination

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use super::models::{Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Credit,
    Debit,
}

impl KindFilter {
    fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Credit => kind == TransactionKind::Credit,
            KindFilter::Debit => kind == TransactionKind::Debit,
        }
    }
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(KindFilter::All),
            "credit" => Ok(KindFilter::Credit),
            "debit" => Ok(KindFilter::Debit),
            other => Err(format!("unknown type filter: {} (expected all, credit, debit)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Week,
    Month,
}

impl DateRange {
    /// Oldest entry age (in whole days) the range still keeps
    pub fn max_age_days(&self) -> Option<i64> {
        match self {
            DateRange::All => None,
            DateRange::Week => Some(7),
            DateRange::Month => Some(30),
        }
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(DateRange::All),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            other => Err(format!("unknown date range: {} (expected all, week, month)", other)),
        }
    }
}

/// Combined history filter. The default keeps everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring of description, counterparty or account name
    pub search: String,
    pub kind: KindFilter,
    pub range: DateRange,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction, today: NaiveDate) -> bool {
        self.matches_search(tx) && self.kind.matches(tx.kind) && self.matches_range(tx, today)
    }

    pub fn apply(&self, txs: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
        txs.iter()
            .filter(|tx| self.matches(tx, today))
            .cloned()
            .collect()
    }

    fn matches_search(&self, tx: &Transaction) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        tx.description.to_lowercase().contains(&needle)
            || tx.account_name.to_lowercase().contains(&needle)
            || tx
                .counterparty
                .as_ref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
    }

    fn matches_range(&self, tx: &Transaction, today: NaiveDate) -> bool {
        match self.range.max_age_days() {
            None => true,
            Some(max_days) => (today - tx.date).num_days() <= max_days,
        }
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// One page of results with "showing X to Y of Z" bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped into `1..=total_pages`
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// `ceil(total_items / page_size)`; zero when there are no items
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 1-based index of the first item shown, 0 for an empty page
    pub fn showing_from(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    pub fn showing_to(&self) -> usize {
        (self.page * self.page_size).min(self.total_items)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `items` into the requested 1-based page.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::log::demo_transactions;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let txs = demo_transactions();
        assert_eq!(TransactionFilter::default().apply(&txs, today()).len(), 5);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let txs = demo_transactions();

        let by_description = TransactionFilter {
            search: "SALARY".to_string(),
            ..Default::default()
        };
        assert_eq!(by_description.apply(&txs, today()).len(), 1);

        let by_counterparty = TransactionFilter {
            search: "supermart".to_string(),
            ..Default::default()
        };
        assert_eq!(by_counterparty.apply(&txs, today())[0].id, "4");

        let by_account = TransactionFilter {
            search: "bob".to_string(),
            ..Default::default()
        };
        assert_eq!(by_account.apply(&txs, today()).len(), 2);
    }

    #[test]
    fn test_kind_filter() {
        let txs = demo_transactions();
        let credits = TransactionFilter {
            kind: KindFilter::Credit,
            ..Default::default()
        };
        let debits = TransactionFilter {
            kind: KindFilter::Debit,
            ..Default::default()
        };
        assert_eq!(credits.apply(&txs, today()).len(), 2);
        assert_eq!(debits.apply(&txs, today()).len(), 3);
    }

    #[test]
    fn test_date_range() {
        let txs = demo_transactions();
        let week = TransactionFilter {
            range: DateRange::Week,
            ..Default::default()
        };
        // 2024-01-13 is exactly 7 days before the 20th and is kept
        let ids: Vec<String> = week.apply(&txs, today()).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let month = TransactionFilter {
            range: DateRange::Month,
            ..Default::default()
        };
        let later = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
        assert_eq!(month.apply(&txs, later).len(), 3);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("Debit".parse::<KindFilter>(), Ok(KindFilter::Debit));
        assert_eq!("month".parse::<DateRange>(), Ok(DateRange::Month));
        assert!("year".parse::<DateRange>().is_err());
    }

    #[test]
    fn test_paginate_bounds() {
        let items: Vec<u32> = (1..=23).collect();

        let first = paginate(&items, 1, 10);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert_eq!((first.showing_from(), first.showing_to()), (1, 10));
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = paginate(&items, 3, 10);
        assert_eq!(last.items, vec![21, 22, 23]);
        assert_eq!((last.showing_from(), last.showing_to()), (21, 23));
        assert!(!last.has_next());

        // out-of-range pages are clamped
        assert_eq!(paginate(&items, 99, 10).page, 3);
        assert_eq!(paginate(&items, 0, 10).page, 1);
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate::<u32>(&[], 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!((page.showing_from(), page.showing_to()), (0, 0));
    }
}
