use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use golf_round_tracker::args::{self, Command, EndArgs, HistoryArgs, StartArgs};
use golf_round_tracker::config::{Settings, load_settings};
use golf_round_tracker::controller::{self, AppState};
use golf_round_tracker::export::history_csv;
use golf_round_tracker::model::{RoundAttributes, TimeSource, local_now};
use golf_round_tracker::storage::RoundStore;
use golf_round_tracker::tracker::RoundTracker;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[actix_web::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = args::args_checks();
    let settings = load_settings(&cli)?;
    let store = settings
        .open_store()
        .with_context(|| format!("open {} store", settings.store))?;

    match cli.command {
        None | Some(Command::Serve(_)) => serve(settings, store).await,
        Some(Command::Start(start)) => run_start(RoundTracker::new(store), &start),
        Some(Command::End(end)) => run_end(RoundTracker::new(store), &end),
        Some(Command::Active) => run_active(&RoundTracker::new(store)),
        Some(Command::History(history)) => run_history(&RoundTracker::new(store), &history),
    }
}

async fn serve(settings: Settings, store: Box<dyn RoundStore>) -> Result<()> {
    let state = Data::new(AppState::new(store, settings.refresh_secs));
    info!(bind = %settings.bind, store = %settings.store, "starting dashboard");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(controller::configure)
            .service(controller::static_files("./static"))
    })
    .bind(&settings.bind)
    .with_context(|| format!("bind {}", settings.bind))?
    .run()
    .await?;
    Ok(())
}

fn run_start<S: RoundStore>(mut tracker: RoundTracker<S>, start: &StartArgs) -> Result<()> {
    let mut attributes = RoundAttributes::new(start.players, start.transport.into());
    attributes.holes = start.holes.map(Into::into);
    attributes.busyness = start.busyness.map(Into::into);
    let start_time = start
        .at
        .map_or(TimeSource::Now, TimeSource::Manual)
        .resolve(local_now());

    let round = tracker.start_round(&start.name, attributes, start_time)?;
    println!("Started round for {}", round.summary_line());
    Ok(())
}

fn run_end<S: RoundStore>(mut tracker: RoundTracker<S>, end: &EndArgs) -> Result<()> {
    let end_time = end
        .at
        .map_or(TimeSource::Now, TimeSource::Manual)
        .resolve(local_now());
    let round = tracker.end_round(&end.name, end_time)?;
    println!("{}", round.summary_line());
    Ok(())
}

fn run_active<S: RoundStore>(tracker: &RoundTracker<S>) -> Result<()> {
    let board = tracker.active_board(local_now())?;
    if board.is_empty() {
        println!("No golfers are currently on the course.");
    }
    for entry in board {
        let marker = if entry.overdue { " (over pace)" } else { "" };
        println!("{}{marker}", entry.summary_line());
    }
    Ok(())
}

fn run_history<S: RoundStore>(tracker: &RoundTracker<S>, history: &HistoryArgs) -> Result<()> {
    let date = history.date.unwrap_or_else(|| local_now().date());
    let rounds = tracker.list_history(date)?;
    if history.csv {
        print!("{}", history_csv(&rounds)?);
    } else if rounds.is_empty() {
        println!("No records yet for {date}.");
    } else {
        for round in &rounds {
            println!("{}", round.summary_line());
        }
    }
    Ok(())
}
