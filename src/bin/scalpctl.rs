//! `scalpctl`: operator terminal for the Scalp Bot API.
//!
//! Every invocation logs in, resolves the role for the route the command
//! belongs to, runs the command, and logs out.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use futures_util::StreamExt;
use serde_json::{Map, Value};

use scalp_dashboard::config::DashboardConfig;
use scalp_dashboard::logging;
use scalp_dashboard::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Operator CLI for the Scalp Bot API")]
struct Cli {
    /// API origin (overrides SCALP_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Poll interval in milliseconds (overrides SCALP_POLL_MS)
    #[arg(long)]
    poll_ms: Option<u64>,

    /// Retry transient failures of polled reads within each poll interval
    #[arg(long, default_value_t = false)]
    retry_polls: bool,

    #[arg(long, env = "SCALP_USERNAME", default_value = "")]
    username: String,

    #[arg(long, env = "SCALP_PASSWORD", hide_env_values = true, default_value = "")]
    password: String,

    /// Log filter, e.g. `debug` or `scalp_dashboard=trace` (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Backend mode and staleness
    Status,
    /// Status plus one gate card per tracked pair
    Overview {
        /// Additional refresh cycles at the poll interval
        #[arg(long, default_value_t = 0)]
        watch: u32,
    },
    /// Open (or closed) positions
    Positions {
        #[arg(long)]
        status: Option<PositionStatus>,
        #[arg(long)]
        pair: Option<String>,
    },
    /// Trade ledger
    Trades {
        #[command(flatten)]
        filter: TradeArgs,
        /// Number of pages to follow
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Download the trade spreadsheet
    Export {
        #[command(flatten)]
        filter: TradeArgs,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Queue PAUSE_PAIR
    Pause { pair: String },
    /// Queue RESUME_PAIR
    Resume { pair: String },
    /// Queue CLOSE_PAIR (paper mode)
    Close { pair: String },
    /// Queue CLOSE_ALL
    CloseAll {
        /// Skip the confirmation prompt
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Read or write backend settings (admin)
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Audit log
    Audit {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        actor: Option<String>,
        #[arg(long)]
        action: Option<String>,
        #[arg(long)]
        since: Option<String>,
    },
    /// Strategy parameter profiles (admin)
    Params {
        #[command(subcommand)]
        action: ParamsAction,
    },
    /// Print the role the backend grants this account
    Role,
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    Get,
    /// Replace settings with the JSON object in FILE
    Set { file: PathBuf },
}

#[derive(Subcommand, Debug)]
enum ParamsAction {
    Get {
        strategy: Strategy,
    },
    /// Replace a profile's parameters with the JSON object in FILE
    Set {
        strategy: Strategy,
        profile: Profile,
        file: PathBuf,
    },
    Activate {
        strategy: Strategy,
        profile: Profile,
    },
    Reload,
}

#[derive(Args, Debug, Clone, Default)]
struct TradeArgs {
    #[arg(long)]
    pair: Option<String>,
    #[arg(long)]
    from_ts: Option<String>,
    #[arg(long)]
    to_ts: Option<String>,
    #[arg(long)]
    side: Option<Side>,
    #[arg(long)]
    mode: Option<TradingMode>,
    #[arg(long)]
    command_id: Option<i64>,
    #[arg(long)]
    limit: Option<u32>,
}

impl From<TradeArgs> for TradeFilter {
    fn from(args: TradeArgs) -> Self {
        TradeFilter {
            pair: args.pair.map(Pair::from),
            from_ts: args.from_ts,
            to_ts: args.to_ts,
            side: args.side,
            mode: args.mode,
            command_id: args.command_id,
            limit: args.limit,
        }
    }
}

impl Cmd {
    fn route(&self) -> Route {
        match self {
            Cmd::Status | Cmd::Overview { .. } | Cmd::Role => Route::Overview,
            Cmd::Pause { .. } | Cmd::Resume { .. } => Route::Overview,
            Cmd::Positions { .. } | Cmd::Close { .. } | Cmd::CloseAll { .. } => Route::Positions,
            Cmd::Trades { .. } | Cmd::Export { .. } => Route::Trades,
            Cmd::Audit { .. } => Route::Audit,
            Cmd::Settings { .. } | Cmd::Params { .. } => Route::Settings,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Loads .env first so clap's env fallbacks see it too.
    let config = DashboardConfig::from_env();
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, mut config: DashboardConfig) -> Result<(), DashboardError> {
    if let Some(url) = cli.base_url {
        config.api_base_url = url;
    }
    if let Some(ms) = cli.poll_ms {
        config.poll_interval = Duration::from_millis(ms);
    }

    let mut builder = DashboardClient::builder().from_config(&config);
    if cli.retry_polls {
        builder = builder.poll_retry(RetryPolicy::within_poll(config.poll_interval));
    }
    let client = builder.build()?;
    client.auth().login(&cli.username, &cli.password).await?;

    let result = match gate_route(&client, cli.command.route()).await {
        Ok(RouteGate::Enter(role)) => execute(&client, role, cli.command).await,
        Ok(RouteGate::Redirect(Route::Login)) => {
            Err(DashboardError::Other("session rejected by backend".to_string()))
        }
        Ok(RouteGate::Redirect(_)) => Err(DashboardError::Other(format!(
            "{} requires the admin role",
            cli.command.route()
        ))),
        Ok(RouteGate::Public) => Ok(()),
        Err(e) => Err(e),
    };

    client.auth().logout().await;
    result
}

async fn execute(client: &DashboardClient, role: Role, command: Cmd) -> Result<(), DashboardError> {
    match command {
        Cmd::Role => {
            println!("{}", role);
        }
        Cmd::Status => {
            print_status(&client.status().get().await?);
        }
        Cmd::Overview { watch } => {
            let mut overview = OverviewView::new(client, role);
            let mut ticks = overview.ticks().take(watch as usize + 1);
            while ticks.next().await.is_some() {
                overview.refresh().await;
                print_overview(&overview).await;
            }
        }
        Cmd::Positions { status, pair } => {
            let filter = PositionFilter {
                status,
                pair: pair.map(Pair::from),
            };
            let positions = client.positions().list(&filter).await?;
            if positions.is_empty() {
                println!("No positions");
            }
            for p in positions {
                println!(
                    "{:<10} {:<5} {:>10} {:>10} {:<26} {}",
                    p.pair,
                    p.side,
                    p.units,
                    p.entry_price.map_or_else(|| "-".to_string(), |v| v.to_string()),
                    format_utc(p.opened_ts_utc.as_deref()),
                    p.status.as_deref().unwrap_or("-"),
                );
            }
        }
        Cmd::Trades { filter, pages } => {
            let mut trades = TradesView::new(client, filter.into());
            trades.load().await;
            for page in 0..pages.max(1) {
                if page > 0 && !trades.next_page().await {
                    break;
                }
                match trades.page().await {
                    QueryState::Ready(page) => print_trades(&page),
                    state => {
                        let message = state.error().map(|e| e.to_string());
                        return Err(DashboardError::Other(
                            message.unwrap_or_else(|| "trades unavailable".to_string()),
                        ));
                    }
                }
            }
        }
        Cmd::Export { filter, out } => {
            let blob = client.trades().export(&filter.into()).await?;
            std::fs::write(&out, &blob.bytes)
                .map_err(|e| DashboardError::Other(format!("{}: {}", out.display(), e)))?;
            println!(
                "Wrote {} bytes to {} (server filename: {})",
                blob.bytes.len(),
                out.display(),
                blob.filename.as_deref().unwrap_or("-")
            );
        }
        Cmd::Pause { pair } => {
            let outcome = client
                .commands()
                .submit(Command::PausePair { pair: pair.into() }, |_| true)
                .await?;
            print_outcome(&outcome);
        }
        Cmd::Resume { pair } => {
            let outcome = client
                .commands()
                .submit(Command::ResumePair { pair: pair.into() }, |_| true)
                .await?;
            print_outcome(&outcome);
        }
        Cmd::Close { pair } => {
            let outcome = client
                .commands()
                .submit(Command::close_pair(pair), |_| true)
                .await?;
            print_outcome(&outcome);
        }
        Cmd::CloseAll { yes } => {
            let positions = PositionsView::new(client, role);
            let outcome = positions
                .close_all(|command| yes || confirm(&format!("Queue {}?", command.command_type())))
                .await?;
            print_outcome(&outcome);
        }
        Cmd::Settings { action } => {
            let view = SettingsView::open(client, role)
                .map_err(|_| DashboardError::Other("settings require the admin role".to_string()))?;
            match action {
                SettingsAction::Get => {
                    view.load().await;
                    match view.draft().await {
                        Some(text) => println!("{}", text),
                        None => println!("Settings unavailable"),
                    }
                }
                SettingsAction::Set { file } => {
                    let text = read_file(&file)?;
                    let result = view.save(&text).await;
                    println!("{}", result.message());
                    if let SaveResult::ValidationFailed(errors) = &result {
                        for e in errors.errors() {
                            println!("  {}: {}", e.field, e.message);
                        }
                    }
                }
            }
        }
        Cmd::Audit {
            limit,
            actor,
            action,
            since,
        } => {
            let log = AuditLog::new(
                client,
                AuditFilter {
                    limit,
                    actor,
                    action,
                    since_ts_utc: since,
                },
            );
            log.load().await;
            match log.state().await {
                QueryState::Ready(AuditView::NotAvailable) => println!("Audit log not available"),
                QueryState::Ready(AuditView::Available(entries)) => {
                    for e in entries {
                        println!(
                            "{:<26} {:<12} {:<20} {}",
                            format_utc(Some(e.ts_utc.as_str())),
                            e.actor,
                            e.action,
                            e.command_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
                        );
                    }
                }
                state => println!(
                    "Audit unavailable: {}",
                    state.error().map_or_else(String::new, |e| e.to_string())
                ),
            }
        }
        Cmd::Params { action } => run_params(client, action).await?,
    }
    Ok(())
}

async fn run_params(client: &DashboardClient, action: ParamsAction) -> Result<(), DashboardError> {
    let params = client.strategy_params();
    match action {
        ParamsAction::Get { strategy } => {
            let snapshot = params.get(strategy).await?;
            println!("{} (active: {})", snapshot.strategy_name, snapshot.active_profile);
            for (profile, values) in &snapshot.profiles {
                println!("  {}", profile);
                for (key, value) in values {
                    println!("    {:<22} {}", key, value);
                }
            }
        }
        ParamsAction::Set {
            strategy,
            profile,
            file,
        } => {
            let text = read_file(&file)?;
            let values: Map<String, Value> = serde_json::from_str(&text)?;
            let updated = params.update(strategy, profile, &values).await?;
            println!(
                "Updated {} ({}), reload command {}",
                updated.updated_keys.join(", "),
                updated.profile,
                updated.reload_command_id
            );
        }
        ParamsAction::Activate { strategy, profile } => {
            let changed = params.set_active_profile(strategy, profile).await?;
            println!(
                "{} now uses {}, reload command {}",
                changed.strategy_name, changed.active_profile, changed.reload_command_id
            );
        }
        ParamsAction::Reload => {
            let queued = params.reload().await?;
            println!("{} queued as command {}", queued.command_type, queued.command_id);
        }
    }
    Ok(())
}

fn print_status(status: &Status) {
    println!("mode        {}", status.mode);
    println!("last cycle  {}", format_utc(status.last_cycle_ts_utc.as_deref()));
    if status.is_stale() {
        let threshold = status
            .stale_threshold_seconds
            .map_or_else(String::new, |s| format!(" (threshold {}s)", s));
        println!("WARNING     trading loop is stale{}", threshold);
    }
}

async fn print_overview(overview: &OverviewView) {
    match overview.status().await.value() {
        Some(status) => print_status(status),
        None => println!("status      unavailable"),
    }
    let cards = overview.pair_cards().await;
    if cards.is_empty() {
        println!("No tracked pairs");
    }
    for card in cards {
        println!("{:<10} {:<4} {}", card.pair, card.status, card.reason);
    }
    println!();
}

fn print_trades(page: &TradePage) {
    for t in &page.items {
        println!(
            "{:>8} {:<10} {:<4} {:<26} {:>10} {}",
            t.id,
            t.pair,
            t.side,
            format_utc(t.opened_ts_utc.as_deref()),
            t.units.map_or_else(|| "-".to_string(), |u| u.to_string()),
            format_pips(t.result),
        );
    }
}

fn print_outcome(outcome: &CommandOutcome) {
    match outcome.ack() {
        Some(ack) => println!("{} (id {}, {})", outcome.message(), ack.id, ack.status),
        None => println!("{}", outcome.message()),
    }
}

fn confirm(prompt: &str) -> bool {
    use std::io::Write;

    print!("{} [y/N] ", prompt);
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn read_file(path: &PathBuf) -> Result<String, DashboardError> {
    std::fs::read_to_string(path)
        .map_err(|e| DashboardError::Other(format!("{}: {}", path.display(), e)))
}
