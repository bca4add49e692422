//! Per-pair gate decisions, bound to their pair by key.

use futures_util::future::join_all;

use crate::client::DashboardClient;
use crate::domain::gate::{GateBadge, GateDecision};
use crate::query::{QueryOptions, QuerySlot, QueryState};
use crate::shared::Pair;

type GateSlot = QuerySlot<Pair, Option<GateDecision>>;

/// Latest gate decision for every tracked pair.
///
/// Gate queries depend on the tracked-pair list: while it is empty the board
/// is inactive and issues no requests. Each pair has its own slot, so
/// concurrent fetches may finish in any order. Slots follow the order of the
/// tracked list.
#[derive(Debug)]
pub struct GateBoard {
    options: QueryOptions,
    slots: Vec<(Pair, GateSlot)>,
}

impl GateBoard {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            options,
            slots: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.slots.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &Pair> {
        self.slots.iter().map(|(pair, _)| pair)
    }

    /// Align the board with `pairs`, in their order. Known pairs keep their
    /// slot, new pairs get one, dropped pairs lose theirs. Repeats are ignored.
    pub fn track(&mut self, pairs: &[Pair]) {
        let mut previous = std::mem::take(&mut self.slots);
        let mut slots: Vec<(Pair, GateSlot)> = Vec::with_capacity(pairs.len());
        for pair in pairs {
            if slots.iter().any(|(p, _)| p == pair) {
                continue;
            }
            let slot = match previous.iter().position(|(p, _)| p == pair) {
                Some(i) => previous.swap_remove(i).1,
                None => QuerySlot::new(&self.options),
            };
            slots.push((pair.clone(), slot));
        }
        self.slots = slots;
    }

    /// Track `pairs` and fetch the latest decision for each, concurrently.
    ///
    /// Returns the number of requests issued; zero when `pairs` is empty.
    pub async fn refresh(&mut self, client: &DashboardClient, pairs: &[Pair]) -> usize {
        self.track(pairs);
        if self.slots.is_empty() {
            return 0;
        }

        let fetches = self.slots.iter().map(move |(pair, slot)| {
            slot.fetch(pair.clone(), move |pair, retry| async move {
                client.gates().latest_with(&pair, retry).await
            })
        });
        let issued = self.slots.len();
        join_all(fetches).await;
        issued
    }

    pub async fn state(&self, pair: &Pair) -> Option<QueryState<Option<GateDecision>>> {
        match self.slots.iter().find(|(p, _)| p == pair) {
            Some((_, slot)) => Some(slot.state().await),
            None => None,
        }
    }

    /// Badge per tracked pair, in tracked order. Pairs without a decision yet
    /// show as HOLD.
    pub async fn badges(&self) -> Vec<(Pair, GateBadge)> {
        let mut badges = Vec::with_capacity(self.slots.len());
        for (pair, slot) in &self.slots {
            let state = slot.state().await;
            let decision = state.value().and_then(Option::as_ref);
            badges.push((pair.clone(), GateBadge::from_latest(decision)));
        }
        badges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gate::GateStatus;
    use tokio_test::block_on;

    fn client() -> DashboardClient {
        // Nothing listens here; any request would fail the refresh.
        DashboardClient::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_pairs_issue_no_requests() {
        block_on(async {
            let client = client();
            let mut board = GateBoard::new(QueryOptions::on_demand());
            assert_eq!(board.refresh(&client, &[]).await, 0);
            assert!(!board.is_active());
            assert!(board.badges().await.is_empty());
        });
    }

    #[test]
    fn test_track_drops_removed_pairs() {
        let mut board = GateBoard::new(QueryOptions::on_demand());
        board.track(&[Pair::from("EUR_USD"), Pair::from("GBP_USD")]);
        board.track(&[Pair::from("GBP_USD")]);
        let pairs: Vec<&Pair> = board.pairs().collect();
        assert_eq!(pairs, vec![&Pair::from("GBP_USD")]);
    }

    #[test]
    fn test_untracked_pair_has_no_state() {
        block_on(async {
            let mut board = GateBoard::new(QueryOptions::on_demand());
            board.track(&[Pair::from("EUR_USD")]);
            assert_eq!(board.state(&Pair::from("USD_JPY")).await, None);
            let badges = board.badges().await;
            assert_eq!(badges[0].1.status, GateStatus::Hold);
        });
    }

    #[test]
    fn test_track_keeps_list_order_and_skips_repeats() {
        let mut board = GateBoard::new(QueryOptions::on_demand());
        let gbp = Pair::from("GBP_USD");
        let eur = Pair::from("EUR_USD");
        board.track(&[gbp.clone(), eur.clone(), gbp.clone()]);
        let pairs: Vec<&Pair> = board.pairs().collect();
        assert_eq!(pairs, vec![&gbp, &eur]);

        board.track(&[eur.clone(), gbp.clone()]);
        let pairs: Vec<&Pair> = board.pairs().collect();
        assert_eq!(pairs, vec![&eur, &gbp]);
    }

    #[test]
    fn test_retracked_pair_keeps_its_slot() {
        block_on(async {
            let eur = Pair::from("EUR_USD");
            let mut board = GateBoard::new(QueryOptions::on_demand());
            board.track(&[eur.clone()]);
            let (_, slot) = &board.slots[0];
            let ticket = slot.begin(eur.clone()).await;
            slot.complete(ticket, Ok(None)).await;

            board.track(&[Pair::from("GBP_USD"), eur.clone()]);
            assert_eq!(board.state(&eur).await, Some(QueryState::Ready(None)));
        });
    }
}
