//! Timetable CLI – prints and edits a class's schedule from the terminal,
//! using the same loader and mutation flow as the web calendar.

mod args;
mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use tracing::{debug, info};

use timetable_common::api::{HttpScheduleApi, ScheduleApi};
use timetable_common::config::{self, Config};
use timetable_common::loader::{FetchOutcome, ScheduleLoader};
use timetable_common::mutation::{MutationError, MutationFlow, MutationOutcome};
use timetable_common::Session;

use crate::args::Command;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = args::parse(std::env::args().skip(1))?;

    // ── load config ──────────────────────────────────────────────────
    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var("TIMETABLE_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(Config::default_path()));
    let config = config::load_or_default(&config_path).context("Config load failed")?;

    info!(
        "Timetable CLI (backend={}, role={})",
        config.api_base_url, config.role
    );

    let api = HttpScheduleApi::with_timeout(&config.api_base_url, config.request_timeout())
        .context("Cannot create HTTP client")?;
    let session = Session::new(config.auth_token.clone());

    run(args.command, api, session, &config).await
}

async fn run(command: Command, api: HttpScheduleApi, session: Session, config: &Config) -> Result<()> {
    let flow = MutationFlow::new(config.role.capabilities());

    match command {
        Command::Periods => print!("{}", render::periods()),

        Command::Classes => {
            let classes = api
                .list_classes(&session)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to load classes")))?;
            print!("{}", render::options(&classes));
        }

        Command::Show { class, view, date, weekends } => {
            let class = pick_class(class, config)?;
            let mut loader = ScheduleLoader::new(api, session);
            expect_loaded(loader.load(&class).await)?;

            let mode = view.unwrap_or(config.default_view);
            let anchor = date.unwrap_or_else(|| Local::now().date_naive());
            let show_weekends = weekends || config.show_weekends;
            print!(
                "{}",
                render::schedule(loader.events(), mode, anchor, show_weekends, &Local)
            );
        }

        Command::Stats { class } => {
            let class = pick_class(class, config)?;
            let mut loader = ScheduleLoader::new(api, session);
            expect_loaded(loader.load(&class).await)?;
            print!("{}", render::stats(loader.state().stats().as_ref()));
        }

        Command::Create { class, form } => {
            let mut loader = ScheduleLoader::new(api, session);
            expect_loaded(loader.load(&class).await)?;
            let outcome = flow.create(&mut loader, &form, &Local).await;
            report_mutation("Created", outcome, loader.events().len())?;
        }

        Command::Update { class, id, form } => {
            let mut loader = ScheduleLoader::new(api, session);
            expect_loaded(loader.load(&class).await)?;
            let outcome = flow.update(&mut loader, &id, &form, &Local).await;
            report_mutation("Updated", outcome, loader.events().len())?;
        }

        Command::Delete { class, id } => {
            let mut loader = ScheduleLoader::new(api, session);
            expect_loaded(loader.load(&class).await)?;
            let outcome = flow.delete(&mut loader, &id).await;
            report_mutation("Deleted", outcome, loader.events().len())?;
        }
    }
    Ok(())
}

fn pick_class(class: Option<String>, config: &Config) -> Result<String> {
    match class.or_else(|| config.default_class.clone()) {
        Some(c) if !c.trim().is_empty() => Ok(c),
        _ => bail!("no class given and DEFAULT_CLASS is not set"),
    }
}

fn expect_loaded(outcome: FetchOutcome) -> Result<()> {
    debug!("Initial load: {outcome:?}");
    match outcome {
        FetchOutcome::Applied(_) => Ok(()),
        FetchOutcome::Failed(msg) => bail!(msg),
        FetchOutcome::Skipped => bail!("schedule not loaded – check AUTH_TOKEN and the class id"),
        FetchOutcome::Stale => bail!("schedule response was superseded"),
    }
}

fn report_mutation(
    verb: &str,
    outcome: Result<MutationOutcome, MutationError>,
    events: usize,
) -> Result<()> {
    match outcome {
        Ok(MutationOutcome { refresh: FetchOutcome::Applied(_) }) => {
            println!("{verb}. The class now has {events} lesson(s).");
            Ok(())
        }
        Ok(MutationOutcome { refresh }) => {
            println!("{verb}, but reloading the schedule did not succeed: {refresh:?}");
            Ok(())
        }
        Err(MutationError::Invalid(errors)) => {
            for field in errors.fields() {
                eprintln!("  {field}: {}", errors.get(field).unwrap_or_default());
            }
            bail!("form has errors – nothing was sent")
        }
        Err(MutationError::Rejected(msg)) => bail!(msg),
    }
}
