//! Commands sub-client: the fire-and-forget dispatcher.

use crate::client::DashboardClient;
use crate::domain::command::{Command, CommandAck, CommandOutcome, CommandRequest};
use crate::error::DashboardError;
use crate::http::RetryPolicy;

pub struct Commands<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Commands<'a> {
    /// Submit `command`, asking `confirm` first when it is destructive.
    ///
    /// Acceptance means the backend queued the command. Nothing here touches
    /// cached view state; the effect shows up on the next poll.
    pub async fn submit<F>(&self, command: Command, confirm: F) -> Result<CommandOutcome, DashboardError>
    where
        F: FnOnce(&Command) -> bool,
    {
        self.submit_request(&command, command.to_request(), confirm).await
    }

    /// Like [`submit`](Self::submit), with an idempotency key so a manual
    /// re-trigger does not enqueue the command twice.
    pub async fn submit_keyed<F>(
        &self,
        command: Command,
        idempotency_key: impl Into<String>,
        confirm: F,
    ) -> Result<CommandOutcome, DashboardError>
    where
        F: FnOnce(&Command) -> bool,
    {
        let request = command.to_request().with_idempotency_key(idempotency_key);
        self.submit_request(&command, request, confirm).await
    }

    async fn submit_request<F>(
        &self,
        command: &Command,
        request: CommandRequest,
        confirm: F,
    ) -> Result<CommandOutcome, DashboardError>
    where
        F: FnOnce(&Command) -> bool,
    {
        let command_type = command.command_type();
        if command.is_destructive() && !confirm(command) {
            tracing::info!(%command_type, "command not confirmed");
            return Ok(CommandOutcome::Declined { command_type });
        }

        let ack: CommandAck = self
            .client
            .http
            .post("/commands", &request, RetryPolicy::None)
            .await
            .inspect_err(|e| tracing::warn!(%command_type, error = %e, "command rejected"))?;

        tracing::info!(%command_type, id = ack.id, status = %ack.status, "command queued");
        Ok(CommandOutcome::Accepted { command_type, ack })
    }
}
