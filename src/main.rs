use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guest_list::{
    config::{AppConfig, Config},
    models::{RegistrationId, RegistrationStatus},
    services::{export, status::available_actions},
    views::{Dashboard, GuestListView, StatusFilter, TrendMode},
    GuestListState,
};

#[derive(Parser, Debug)]
#[command(name = "guest_list", version)]
#[command(about = "Guest list and check-in for one campus event")]
#[command(
    after_help = "Environment:\n  EVENT_ID       Event to manage (required)\n  API_BASE_URL   Campus events API\n  API_TOKEN      Organizer bearer token"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dashboard for the event (default)
    Summary {
        #[arg(value_enum, default_value_t)]
        mode: Trend,
    },
    /// One page of the guest list
    List {
        #[command(flatten)]
        filters: Filters,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Change the status of one registration
    SetStatus {
        registration_id: String,
        /// confirmed | checked_in | cancelled
        status: RegistrationStatus,
    },
    /// Write guest_list_<event>.csv with every matching row
    Export {
        #[command(flatten)]
        filters: Filters,
    },
    /// Poll and reprint the summary until Ctrl-C
    Watch {
        #[arg(value_enum, default_value_t)]
        mode: Trend,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Trend {
    /// By hour of day
    #[default]
    #[value(alias = "hourly")]
    Daily,
    /// By day of week
    Weekly,
}

impl From<Trend> for TrendMode {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Daily => TrendMode::Daily,
            Trend::Weekly => TrendMode::Weekly,
        }
    }
}

#[derive(Args, Debug)]
struct Filters {
    /// Case-insensitive match on guest name or student id
    #[arg(long, default_value = "")]
    search: String,
    /// all | confirmed | checked_in | cancelled
    #[arg(long, default_value = "all")]
    status: StatusFilter,
}

impl Filters {
    fn apply(&self, view: &mut GuestListView) {
        view.set_search(self.search.clone());
        view.set_status_filter(self.status);
    }
}

fn init_tracing(app: &AppConfig) {
    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&app.rust_log));

    if app.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    let c = &dashboard.counts;
    println!("Total registrations: {}", c.total);
    println!("  Checked in: {:>4} ({:.1}%)", c.checked_in, dashboard.checked_in_rate);
    println!("  Pending:    {:>4} ({:.1}%)", c.pending, dashboard.pending_rate);
    println!("  Cancelled:  {:>4} ({:.1}%)", c.cancelled, dashboard.cancelled_rate);

    println!("Registration trend ({:?}):", dashboard.trend.mode);
    for bucket in &dashboard.trend.buckets {
        println!("  {:>5} {:>4} {}", bucket.label, bucket.count, "#".repeat(bucket.count.min(60)));
    }

    let r = &dashboard.reviews;
    println!("Reviews: {} (average {:.2})", r.count, r.average_rating);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing(&config.app);

    if config.guest_list.event_id.is_empty() {
        bail!("EVENT_ID must be set");
    }
    if config.api.token.is_empty() {
        warn!("API_TOKEN is empty, the backend will most likely reject requests");
    }

    info!("Guest list client for event {}", config.guest_list.event_id);
    let state = GuestListState::new(config)?;

    let command = cli.command.unwrap_or(Commands::Summary { mode: Trend::default() });
    match command {
        Commands::Summary { mode } => {
            state.refresh().await;
            let store = state.store.read().await;
            print_dashboard(&Dashboard::build(&store, mode.into()));
        }
        Commands::List { filters, page } => {
            state.refresh().await;
            let mut view = state.view();
            filters.apply(&mut view);
            view.set_page(page);

            let store = state.store.read().await;
            let page = view.render(store.registrations());
            for r in &page.items {
                let actions: Vec<&str> = available_actions(r.status).iter().map(|a| a.label).collect();
                println!(
                    "{:<12} {:<28} {:<12} {:<11} {}  [{}]",
                    r.id,
                    r.guest.name,
                    r.guest.student_id,
                    r.status.label(),
                    r.booking_time.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
                    actions.join(" | ")
                );
            }
            println!(
                "Page {} of {} ({} matching)",
                page.page,
                page.total_pages.max(1),
                page.total_matches
            );
        }
        Commands::SetStatus { registration_id, status } => {
            let id = RegistrationId(registration_id);
            state.refresh().await;
            match state.transitions.transition(&id, status).await {
                Ok(updated) => println!("{} {} is now {}", updated.id, updated.guest.name, updated.status.label()),
                Err(e) => bail!(e.user_message()),
            }
        }
        Commands::Export { filters } => {
            state.refresh().await;
            let mut view = state.view();
            filters.apply(&mut view);

            let store = state.store.read().await;
            let rows = view.matching(store.registrations());
            let path = export::write_csv(&state.config.guest_list.export_dir, store.event_id(), rows)
                .await
                .context("failed to write CSV export")?;
            println!("Exported to {}", path.display());
        }
        Commands::Watch { mode } => {
            let mode = TrendMode::from(mode);
            let poller = state.start_polling();
            let mut ticker = tokio::time::interval(Duration::from_secs(
                state.config.guest_list.poll_interval_seconds,
            ));

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    _ = ticker.tick() => {
                        let store = state.store.read().await;
                        if store.last_refreshed().is_some() {
                            print_dashboard(&Dashboard::build(&store, mode));
                            println!();
                        }
                    }
                }
            }

            poller.shutdown();
        }
    }

    Ok(())
}
