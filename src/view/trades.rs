//! Trades: filtered, cursor-paginated ledger with spreadsheet export.

use crate::client::DashboardClient;
use crate::domain::settings::Settings;
use crate::domain::trade::{TradeFilter, TradeLedger, TradePage, TradeQuery};
use crate::error::DashboardError;
use crate::http::Blob;
use crate::query::{QueryOptions, QuerySlot, QueryState};
use crate::shared::Pair;

pub struct TradesView {
    client: DashboardClient,
    ledger: TradeLedger,
    page: QuerySlot<TradeQuery, TradePage>,
    settings: QuerySlot<(), Settings>,
}

impl TradesView {
    pub fn new(client: &DashboardClient, filter: TradeFilter) -> Self {
        Self {
            client: client.clone(),
            ledger: TradeLedger::new(filter),
            page: QuerySlot::new(&QueryOptions::on_demand()),
            settings: QuerySlot::new(&QueryOptions::one_shot()),
        }
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    /// Replace the filters and restart from the first page. Call
    /// [`load`](Self::load) afterwards.
    pub fn set_filter(&mut self, filter: TradeFilter) {
        self.ledger.set_filter(filter);
    }

    /// Fetch the page for the ledger's current key.
    ///
    /// Returns `false` if the filters changed while the request was in flight.
    pub async fn load(&mut self) -> bool {
        let query = self.ledger.query();
        let client = &self.client;
        let applied = self
            .page
            .fetch(query.clone(), |query, _| async move { client.trades().list(&query).await })
            .await;
        if applied {
            if let Some(page) = self.page.state().await.value() {
                self.ledger.observe(&query, page);
            }
        }
        applied
    }

    /// Advance to and load the next page. Returns `false` on the last page.
    pub async fn next_page(&mut self) -> bool {
        if !self.ledger.next_page() {
            return false;
        }
        self.load().await
    }

    pub async fn page(&self) -> QueryState<TradePage> {
        self.page.state().await
    }

    /// Fetch settings once for the pair filter choices.
    pub async fn load_pair_options(&self) {
        let client = &self.client;
        self.settings
            .fetch((), |_, _| async move { client.settings().get().await })
            .await;
    }

    /// Tracked pairs to offer in the pair filter, in settings order. Empty
    /// until settings load, or when they are unavailable to this role.
    pub async fn pair_options(&self) -> Vec<Pair> {
        self.settings
            .state()
            .await
            .value()
            .map(Settings::tracked_pairs)
            .unwrap_or_default()
    }

    /// Spreadsheet for the current filters, ignoring pagination.
    pub async fn export(&self) -> Result<Blob, DashboardError> {
        self.client.trades().export(self.ledger.filter()).await
    }
}
