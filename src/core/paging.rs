use chrono::NaiveDate;

use super::cursor::encode_cursor;
use super::types::{CursorData, InvestmentPage, InvestmentRecord, SortOption, SortValue};

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Date(NaiveDate),
    Amount(f64),
}

// Rows strictly after (last_sort_value, last_id) in sort order are kept;
// last_id breaks ties because neither sort column is unique. None when the
// cursor's sort value does not fit the active sort option, which callers
// treat like any other malformed cursor.
pub fn page_after(
    records: &[InvestmentRecord],
    sort: SortOption,
    cursor: Option<&CursorData>,
    limit: usize,
) -> Option<InvestmentPage> {
    let anchor = match cursor {
        Some(data) => Some((anchor_for(sort, data)?, data.last_id.as_str())),
        None => None,
    };

    let mut remaining = records.iter().filter(|record| match anchor {
        Some((anchor, last_id)) => after_anchor(record, sort, anchor, last_id),
        None => true,
    });

    let items: Vec<InvestmentRecord> = remaining.by_ref().take(limit).cloned().collect();
    let has_more = remaining.next().is_some();
    let next_cursor = if has_more {
        items.last().map(|last| {
            encode_cursor(&CursorData {
                last_id: last.id.clone(),
                last_sort_value: sort_value_of(sort, last),
            })
        })
    } else {
        None
    };

    Some(InvestmentPage {
        items,
        has_more,
        next_cursor,
    })
}

fn anchor_for(sort: SortOption, cursor: &CursorData) -> Option<Anchor> {
    match (sort, &cursor.last_sort_value) {
        (SortOption::DateAsc | SortOption::DateDesc, SortValue::Date(text)) => {
            text.parse::<NaiveDate>().ok().map(Anchor::Date)
        }
        (SortOption::AmountAsc | SortOption::AmountDesc, SortValue::Amount(value)) => {
            Some(Anchor::Amount(*value))
        }
        _ => None,
    }
}

fn after_anchor(
    record: &InvestmentRecord,
    sort: SortOption,
    anchor: Anchor,
    last_id: &str,
) -> bool {
    match (sort, anchor) {
        (SortOption::DateAsc, Anchor::Date(date)) => {
            record.acquired_on > date
                || (record.acquired_on == date && record.id.as_str() > last_id)
        }
        (SortOption::DateDesc, Anchor::Date(date)) => {
            record.acquired_on < date
                || (record.acquired_on == date && record.id.as_str() < last_id)
        }
        (SortOption::AmountAsc, Anchor::Amount(amount)) => {
            record.amount > amount || (record.amount == amount && record.id.as_str() > last_id)
        }
        (SortOption::AmountDesc, Anchor::Amount(amount)) => {
            record.amount < amount || (record.amount == amount && record.id.as_str() < last_id)
        }
        _ => false,
    }
}

fn sort_value_of(sort: SortOption, record: &InvestmentRecord) -> SortValue {
    match sort {
        SortOption::DateAsc | SortOption::DateDesc => {
            SortValue::Date(record.acquired_on.to_string())
        }
        SortOption::AmountAsc | SortOption::AmountDesc => SortValue::Amount(record.amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cursor::decode_cursor;

    fn record(id: &str, acquired_on: &str, amount: f64) -> InvestmentRecord {
        InvestmentRecord {
            id: id.to_string(),
            acquired_on: acquired_on.parse().expect("valid test date"),
            amount,
        }
    }

    // Sorted ascending by acquisition date, with a tie on 2024-02-01.
    fn by_date_asc() -> Vec<InvestmentRecord> {
        vec![
            record("a-1", "2024-01-10", 500.0),
            record("b-2", "2024-02-01", 250.0),
            record("c-3", "2024-02-01", 800.0),
            record("d-4", "2024-03-15", 120.0),
        ]
    }

    fn ids(page: &InvestmentPage) -> Vec<&str> {
        page.items.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn first_page_without_cursor_takes_limit_rows() {
        let rows = by_date_asc();
        let page = page_after(&rows, SortOption::DateAsc, None, 2).expect("valid");

        assert_eq!(ids(&page), vec!["a-1", "b-2"]);
        assert!(page.has_more);
        assert!(page.next_cursor.is_some());
    }

    #[test]
    fn scan_resumes_after_tie_using_id_tiebreak() {
        let rows = by_date_asc();
        let first = page_after(&rows, SortOption::DateAsc, None, 2).expect("valid");
        let token = first.next_cursor.expect("more rows remain");
        let data = decode_cursor(&token).expect("own cursor decodes");
        assert_eq!(data.last_id, "b-2");

        // c-3 shares b-2's date; the id tiebreak must not skip or repeat it.
        let second = page_after(&rows, SortOption::DateAsc, Some(&data), 2).expect("valid");
        assert_eq!(ids(&second), vec!["c-3", "d-4"]);
        assert!(!second.has_more);
        assert_eq!(second.next_cursor, None);
    }

    #[test]
    fn descending_date_scan_reverses_comparison_and_tiebreak() {
        let mut rows = by_date_asc();
        rows.reverse();
        let first = page_after(&rows, SortOption::DateDesc, None, 2).expect("valid");
        assert_eq!(ids(&first), vec!["d-4", "c-3"]);

        let data = decode_cursor(&first.next_cursor.expect("more rows")).expect("decodes");
        let second = page_after(&rows, SortOption::DateDesc, Some(&data), 2).expect("valid");
        assert_eq!(ids(&second), vec!["b-2", "a-1"]);
        assert!(!second.has_more);
    }

    #[test]
    fn amount_scan_pages_by_amount_key() {
        let mut rows = by_date_asc();
        rows.sort_by(|a, b| a.amount.total_cmp(&b.amount));
        let first = page_after(&rows, SortOption::AmountAsc, None, 3).expect("valid");
        assert_eq!(ids(&first), vec!["d-4", "b-2", "a-1"]);

        let data = decode_cursor(&first.next_cursor.expect("more rows")).expect("decodes");
        assert_eq!(data.last_sort_value, SortValue::Amount(500.0));
        let second = page_after(&rows, SortOption::AmountAsc, Some(&data), 3).expect("valid");
        assert_eq!(ids(&second), vec!["c-3"]);
    }

    #[test]
    fn amount_ties_are_broken_by_id() {
        let rows = vec![
            record("a-1", "2024-01-01", 100.0),
            record("b-2", "2024-01-02", 100.0),
            record("c-3", "2024-01-03", 100.0),
        ];
        let first = page_after(&rows, SortOption::AmountAsc, None, 1).expect("valid");
        assert_eq!(ids(&first), vec!["a-1"]);

        let data = decode_cursor(&first.next_cursor.expect("more rows")).expect("decodes");
        let second = page_after(&rows, SortOption::AmountAsc, Some(&data), 2).expect("valid");
        assert_eq!(ids(&second), vec!["b-2", "c-3"]);
    }

    #[test]
    fn exhausted_listing_has_no_cursor() {
        let rows = by_date_asc();
        let page = page_after(&rows, SortOption::DateAsc, None, 10).expect("valid");
        assert_eq!(page.items.len(), rows.len());
        assert!(!page.has_more);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn cursor_with_mismatched_sort_value_is_rejected() {
        let rows = by_date_asc();
        let data = CursorData {
            last_id: "a-1".to_string(),
            last_sort_value: SortValue::Amount(500.0),
        };
        assert!(page_after(&rows, SortOption::DateAsc, Some(&data), 2).is_none());

        let data = CursorData {
            last_id: "a-1".to_string(),
            last_sort_value: SortValue::Date("2024-01-10".to_string()),
        };
        assert!(page_after(&rows, SortOption::AmountAsc, Some(&data), 2).is_none());
    }

    #[test]
    fn cursor_with_unparseable_date_is_rejected() {
        let rows = by_date_asc();
        let data = CursorData {
            last_id: "a-1".to_string(),
            last_sort_value: SortValue::Date("yesterday".to_string()),
        };
        assert!(page_after(&rows, SortOption::DateAsc, Some(&data), 2).is_none());
    }
}
