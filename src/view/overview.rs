//! Overview: status, staleness and one card per tracked pair.

use futures_util::join;
use futures_util::stream::LocalBoxStream;

use crate::auth::Role;
use crate::client::DashboardClient;
use crate::domain::command::{Command, CommandOutcome};
use crate::domain::gate::GateStatus;
use crate::domain::settings::Settings;
use crate::domain::status::Status;
use crate::error::DashboardError;
use crate::query::{GateBoard, QueryOptions, QuerySlot, QueryState};
use crate::shared::Pair;

/// A tracked pair with its latest gate verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCard {
    pub pair: Pair,
    pub status: GateStatus,
    /// First reason of the latest decision, or `"n/a"`.
    pub reason: String,
    /// Whether the operator may pause this pair from the card.
    pub can_pause: bool,
}

pub struct OverviewView {
    client: DashboardClient,
    role: Role,
    status: QuerySlot<(), Status>,
    settings: QuerySlot<(), Settings>,
    gates: GateBoard,
}

impl OverviewView {
    pub fn new(client: &DashboardClient, role: Role) -> Self {
        let polled = QueryOptions::polled(client.poll_interval(), client.poll_retry().clone());
        Self {
            client: client.clone(),
            role,
            status: QuerySlot::new(&polled),
            settings: QuerySlot::new(&QueryOptions::one_shot()),
            gates: GateBoard::new(polled),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Poll schedule of the status and gate queries.
    pub fn ticks(&self) -> LocalBoxStream<'static, u64> {
        self.status.options().ticks()
    }

    /// One poll cycle. Settings load once; status and gates refresh together.
    ///
    /// The gate board stays inactive until settings yield at least one pair.
    pub async fn refresh(&mut self) {
        if matches!(self.settings.state().await, QueryState::Idle) {
            self.load_settings().await;
        }
        let pairs = self.tracked_pairs().await;

        let client = &self.client;
        let status = self
            .status
            .fetch((), |_, retry| async move { client.status().get_with(retry).await });
        let gates = self.gates.refresh(client, &pairs);
        join!(status, gates);
    }

    /// Fetch settings again, e.g. after an edit.
    pub async fn load_settings(&self) {
        let client = &self.client;
        self.settings
            .fetch((), |_, _| async move { client.settings().get().await })
            .await;
    }

    pub async fn status(&self) -> QueryState<Status> {
        self.status.state().await
    }

    pub async fn settings(&self) -> QueryState<Settings> {
        self.settings.state().await
    }

    /// Recomputed from the settings slot on every call.
    pub async fn tracked_pairs(&self) -> Vec<Pair> {
        self.settings
            .state()
            .await
            .value()
            .map(Settings::tracked_pairs)
            .unwrap_or_default()
    }

    /// True when the backend reports its trading loop as stale.
    pub async fn stale_warning(&self) -> bool {
        self.status
            .state()
            .await
            .value()
            .is_some_and(Status::is_stale)
    }

    pub async fn pair_cards(&self) -> Vec<PairCard> {
        let can_pause = self.role.is_admin();
        self.gates
            .badges()
            .await
            .into_iter()
            .map(|(pair, badge)| PairCard {
                pair,
                status: badge.status,
                reason: badge.reason,
                can_pause,
            })
            .collect()
    }

    /// Queue `PAUSE_PAIR`. The card keeps its badge until the next refresh.
    pub async fn pause_pair(&self, pair: &Pair) -> Result<CommandOutcome, DashboardError> {
        self.client
            .commands()
            .submit(Command::PausePair { pair: pair.clone() }, |_| true)
            .await
    }

    pub async fn resume_pair(&self, pair: &Pair) -> Result<CommandOutcome, DashboardError> {
        self.client
            .commands()
            .submit(Command::ResumePair { pair: pair.clone() }, |_| true)
            .await
    }
}
