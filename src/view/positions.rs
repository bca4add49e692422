//! Positions: polled list with close actions.

use futures_util::join;

use crate::auth::Role;
use crate::client::DashboardClient;
use crate::domain::command::{Command, CommandOutcome};
use crate::domain::position::{Position, PositionFilter};
use crate::domain::status::Status;
use crate::error::DashboardError;
use crate::query::{QueryOptions, QuerySlot, QueryState};
use crate::shared::Pair;

pub struct PositionsView {
    client: DashboardClient,
    role: Role,
    filter: PositionFilter,
    positions: QuerySlot<PositionFilter, Vec<Position>>,
    status: QuerySlot<(), Status>,
}

impl PositionsView {
    pub fn new(client: &DashboardClient, role: Role) -> Self {
        let polled = QueryOptions::polled(client.poll_interval(), client.poll_retry().clone());
        Self {
            client: client.clone(),
            role,
            filter: PositionFilter::default(),
            positions: QuerySlot::new(&polled),
            status: QuerySlot::new(&polled),
        }
    }

    pub fn can_close(&self) -> bool {
        self.role.is_admin()
    }

    /// `CLOSE ALL` stays available unless live trading is reported off and
    /// there is nothing to close. An unknown status does not disable it.
    pub async fn can_close_all(&self) -> bool {
        if !self.can_close() {
            return false;
        }
        let live_off = self
            .status
            .state()
            .await
            .value()
            .is_some_and(|s| s.live_trading_enabled == Some(false));
        let nothing_open = self
            .positions
            .state()
            .await
            .value()
            .map_or(true, Vec::is_empty);
        !(live_off && nothing_open)
    }

    pub fn filter(&self) -> &PositionFilter {
        &self.filter
    }

    /// Takes effect on the next refresh.
    pub fn set_filter(&mut self, filter: PositionFilter) {
        self.filter = filter;
    }

    /// One poll cycle: positions and status together.
    pub async fn refresh(&self) {
        let client = &self.client;
        let positions = self
            .positions
            .fetch(self.filter.clone(), |filter, retry| async move {
                client.positions().list_with(&filter, retry).await
            });
        let status = self
            .status
            .fetch((), |_, retry| async move { client.status().get_with(retry).await });
        join!(positions, status);
    }

    pub async fn positions(&self) -> QueryState<Vec<Position>> {
        self.positions.state().await
    }

    pub async fn status(&self) -> QueryState<Status> {
        self.status.state().await
    }

    pub async fn close_pair(&self, pair: &Pair) -> Result<CommandOutcome, DashboardError> {
        self.client
            .commands()
            .submit(Command::close_pair(pair.clone()), |_| true)
            .await
    }

    /// Asks `confirm` before queueing `CLOSE_ALL`.
    pub async fn close_all<F>(&self, confirm: F) -> Result<CommandOutcome, DashboardError>
    where
        F: FnOnce(&Command) -> bool,
    {
        self.client.commands().submit(Command::CloseAll, confirm).await
    }
}
