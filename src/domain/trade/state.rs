//! Trade ledger state: app-owned pagination over the trade filters.

use super::{TradeFilter, TradePage, TradeQuery};

/// Cursor-paginated view over the ledger for one filter set.
///
/// The app owns instances of this type, feeds it each page it fetched, and
/// asks it for the next [`TradeQuery`]. Changing the filter always restarts
/// from the first page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeLedger {
    filter: TradeFilter,
    cursor: Option<i64>,
    /// `next_cursor` reported by the page fetched for the current query.
    next_cursor: Option<i64>,
}

impl TradeLedger {
    pub fn new(filter: TradeFilter) -> Self {
        Self {
            filter,
            cursor: None,
            next_cursor: None,
        }
    }

    pub fn filter(&self) -> &TradeFilter {
        &self.filter
    }

    pub fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    /// The key the current page is fetched under.
    pub fn query(&self) -> TradeQuery {
        TradeQuery {
            filter: self.filter.clone(),
            cursor: self.cursor,
        }
    }

    /// Replace the filter set. Any cursor from the previous filter is dropped.
    ///
    /// Returns `true` when the filter actually changed.
    pub fn set_filter(&mut self, filter: TradeFilter) -> bool {
        let changed = self.filter != filter;
        self.filter = filter;
        self.cursor = None;
        self.next_cursor = None;
        changed
    }

    /// Record the page fetched for [`query`](Self::query).
    ///
    /// Pages fetched under a different key are ignored.
    pub fn observe(&mut self, query: &TradeQuery, page: &TradePage) -> bool {
        if *query != self.query() {
            return false;
        }
        self.next_cursor = page.next_cursor;
        true
    }

    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Advance to the next page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        match self.next_cursor.take() {
            Some(cursor) => {
                self.cursor = Some(cursor);
                true
            }
            None => false,
        }
    }

    /// Back to the first page of the same filter.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.next_cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Pair, Side};

    fn page(next_cursor: Option<i64>) -> TradePage {
        TradePage {
            items: Vec::new(),
            next_cursor,
        }
    }

    fn eur_usd() -> TradeFilter {
        TradeFilter {
            pair: Some(Pair::from("EUR_USD")),
            ..Default::default()
        }
    }

    #[test]
    fn test_next_page_adopts_cursor() {
        let mut ledger = TradeLedger::new(eur_usd());
        let first = ledger.query();
        assert_eq!(first.cursor, None);

        assert!(ledger.observe(&first, &page(Some(41))));
        assert!(ledger.has_next());
        assert!(ledger.next_page());
        assert_eq!(ledger.query().cursor, Some(41));

        let second = ledger.query();
        ledger.observe(&second, &page(None));
        assert!(!ledger.next_page());
        assert_eq!(ledger.cursor(), Some(41));
    }

    #[test]
    fn test_filter_change_discards_cursor() {
        let mut ledger = TradeLedger::new(eur_usd());
        let first = ledger.query();
        ledger.observe(&first, &page(Some(41)));
        ledger.next_page();
        let second = ledger.query();
        ledger.observe(&second, &page(Some(20)));

        let changed = ledger.set_filter(TradeFilter {
            side: Some(Side::Buy),
            ..eur_usd()
        });
        assert!(changed);
        assert_eq!(ledger.cursor(), None);
        assert!(!ledger.has_next());
        assert_eq!(ledger.query().cursor, None);
    }

    #[test]
    fn test_same_filter_still_restarts() {
        let mut ledger = TradeLedger::new(eur_usd());
        let first = ledger.query();
        ledger.observe(&first, &page(Some(9)));
        ledger.next_page();

        assert!(!ledger.set_filter(eur_usd()));
        assert_eq!(ledger.cursor(), None);
    }

    #[test]
    fn test_superseded_page_ignored() {
        let mut ledger = TradeLedger::new(eur_usd());
        let stale = ledger.query();
        ledger.set_filter(TradeFilter::default());

        assert!(!ledger.observe(&stale, &page(Some(5))));
        assert!(!ledger.has_next());
    }
}
