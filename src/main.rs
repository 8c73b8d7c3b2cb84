// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stravach command-line client.
//!
//! Runs the same flows as the web pages against the backend API:
//!
//! ```text
//! stravach login                 # handshake with TG_USER_ID / TG_* identity
//! stravach list                  # show activities for STRAVACH_USER_ID
//! stravach refresh               # re-sync last 10 activities, then list
//! stravach generate <id>...      # request AI names for activities
//! stravach broadcast <message>   # send a broadcast
//! ```
//!
//! Commands can be chained (`stravach login list`); they share one session.

use anyhow::{bail, Context};
use stravach_client::{
    config::Config,
    models::GenerationStatus,
    routes::Route,
    services::ActivityListController,
    view::{ActivityRow, PageView},
    App,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
enum Command {
    Login,
    List,
    Refresh,
    Generate(Vec<u64>),
    Broadcast(String),
}

fn parse_commands(args: &[String]) -> anyhow::Result<Vec<Command>> {
    let mut commands = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "login" => commands.push(Command::Login),
            "list" => commands.push(Command::List),
            "refresh" => commands.push(Command::Refresh),
            "generate" => {
                let mut ids = Vec::new();
                while let Some(id) = args.get(i + 1).and_then(|a| a.parse::<u64>().ok()) {
                    ids.push(id);
                    i += 1;
                }
                if ids.is_empty() {
                    bail!("generate needs at least one activity id");
                }
                commands.push(Command::Generate(ids));
            }
            "broadcast" => {
                let message = args[i + 1..].join(" ");
                commands.push(Command::Broadcast(message));
                break;
            }
            other => bail!("unknown command: {other}"),
        }
        i += 1;
    }
    if commands.is_empty() {
        bail!("usage: stravach [login] [list] [refresh] [generate <id>...] [broadcast <message>]");
    }
    Ok(commands)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let commands = parse_commands(&args)?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(api_url = %config.api_url, "Starting stravach client");

    let mut user_id = config.user_id;
    let app = App::new(config)?;
    let mut page: Option<ActivityListController> = None;

    for command in commands {
        match command {
            Command::Login => {
                let identity = app
                    .config
                    .login_identity
                    .clone()
                    .context("TG_USER_ID is required for login")?;
                match app.auth_bridge().complete_login(identity).await {
                    Ok(route) => {
                        println!("Logged in, continue at {}", route);
                        user_id = route.user_id().or(user_id);
                    }
                    Err(e) => {
                        eprintln!("{}", e.notice());
                        std::process::exit(1);
                    }
                }
            }
            Command::List => {
                let page = open_page(&app, &mut page, user_id)?;
                let _ = page.load_activities().await;
                print_page(page);
            }
            Command::Refresh => {
                let page = open_page(&app, &mut page, user_id)?;
                println!("{}", page.refresh_label());
                let _ = page.refresh_recent().await;
                print_page(page);
            }
            Command::Generate(ids) => {
                let page = open_page(&app, &mut page, user_id)?;
                if page.store().snapshot().is_empty() {
                    page.load_activities().await?;
                }
                generate(page, &ids).await;
            }
            Command::Broadcast(message) => {
                let mut form = app.broadcast_form();
                form.set_draft(message);
                let _ = form.submit().await;
                if let Some(status) = form.status() {
                    println!("{}", status);
                }
            }
        }
    }

    Ok(())
}

fn open_page<'a>(
    app: &App,
    page: &'a mut Option<ActivityListController>,
    user_id: Option<u64>,
) -> anyhow::Result<&'a ActivityListController> {
    let user_id = user_id.context("STRAVACH_USER_ID (or login) is required")?;
    if page.as_ref().map(|p| p.user_id()) != Some(user_id) {
        tracing::debug!(route = %Route::Activities(user_id), "Opening activity page");
        *page = Some(app.activities_page(user_id));
    }
    page.as_ref().context("activity page not open")
}

/// Trigger generation for each id and wait until none is pending.
async fn generate(page: &ActivityListController, ids: &[u64]) {
    for &id in ids {
        if let Err(e) = page.generate_name(id) {
            eprintln!("activity {}: {}", id, e);
        }
    }

    let mut rx = page.store().subscribe();
    let settled = rx
        .wait_for(|collection| {
            ids.iter().all(|id| {
                collection
                    .get(*id)
                    .map_or(true, |a| a.generation_status != GenerationStatus::Pending)
            })
        })
        .await
        .is_ok();
    if !settled {
        return;
    }

    for row in page.rows().iter().filter(|row| ids.contains(&row.id)) {
        println!(
            "{:>12}  {}  {}",
            row.id,
            row.name,
            row.message.as_deref().unwrap_or("")
        );
    }
}

fn print_page(page: &ActivityListController) {
    match page.render() {
        PageView::Loading => println!("Loading activities..."),
        PageView::Failed(message) => eprintln!("{}", message),
        PageView::Ready(rows) => rows.iter().for_each(print_row),
    }
}

fn print_row(row: &ActivityRow) {
    let mut line = format!(
        "{:>12}  {}  {:<8} {:>10}  {}",
        row.id, row.date, row.activity_type, row.distance, row.name
    );
    if let Some(hr) = &row.heart_rate {
        line.push_str(&format!("  {}", hr));
    }
    if let Some(speed) = &row.speed {
        line.push_str(&format!("  {}", speed));
    }
    println!("{}", line);
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stravach_client=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
