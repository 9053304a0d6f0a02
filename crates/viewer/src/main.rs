//! Grimview Viewer - Main entry point.
//!
//! Loads one recorded game through the replay pipeline and prints the
//! normalized timeline plus the player snapshot at a chosen cursor
//! position. Stands in for the interactive presentation layer.
//!
//! Usage: `grimview <game-log-file> [cursor-index]`
//!
//! The log is read from `GAME_LOG_DIR` (default `.`), or fetched over HTTP
//! when `GAME_LOG_BASE_URL` is set.

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grimview_domain::{display_name, is_evil_role, CompositeEvent, GameStateSnapshot};
use grimview_engine::{
    extract_game_metadata, load_game, relevant_players, FileLogFetcher, HttpLogFetcher,
    LogFetcher, ReplaySession,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grimview=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(game_id) = args.next() else {
        bail!("usage: grimview <game-log-file> [cursor-index]");
    };
    let cursor: usize = match args.next() {
        Some(raw) => raw.parse().context("cursor index must be a number")?,
        None => 0,
    };

    let fetcher: Box<dyn LogFetcher> = match std::env::var("GAME_LOG_BASE_URL") {
        Ok(base_url) => Box::new(HttpLogFetcher::new(&base_url)),
        Err(_) => {
            let dir = std::env::var("GAME_LOG_DIR").unwrap_or_else(|_| ".".into());
            Box::new(FileLogFetcher::new(dir))
        }
    };

    tracing::info!(game_id, "loading game");
    let events = load_game(fetcher.as_ref(), &game_id).await?;

    if let Ok(text) = fetcher.fetch(&game_id).await {
        if let Some(meta) = extract_game_metadata(&game_id, &text) {
            println!("{} ({} {})", meta.title, meta.date, meta.time);
            println!("In play: {}", meta.characters_in_play.join(", "));
            println!();
        }
    }

    let mut session = ReplaySession::new();
    let ticket = session.begin_selection(&game_id);
    session.apply(ticket, events);
    let cursor = session.set_cursor(cursor);

    print_timeline(session.events(), cursor);

    match session.current_event().and_then(CompositeEvent::snapshot) {
        Some(snapshot) => print_snapshot(snapshot),
        None => println!("\n(no game state recorded at event {})", cursor + 1),
    }
    Ok(())
}

fn print_timeline(events: &[CompositeEvent], cursor: usize) {
    for (index, event) in events.iter().enumerate() {
        let marker = if index == cursor { ">" } else { " " };
        let mut line = format!(
            "{marker} {:>4}  R{} {:<12} {:<24} {}",
            index + 1,
            event.record.round_number,
            event.record.phase,
            event.event_type(),
            summary(event),
        );

        let sets = relevant_players(event);
        if !sets.is_empty() {
            let originators: Vec<_> = sets.originators.iter().cloned().collect();
            let affected: Vec<_> = sets.affected.iter().cloned().collect();
            line.push_str(&format!(
                "  [{} -> {}]",
                originators.join(","),
                affected.join(",")
            ));
        }
        println!("{line}");
    }
}

fn summary(event: &CompositeEvent) -> String {
    if event.record.description.is_empty() {
        event.record.participants.join(", ")
    } else {
        event.record.description.clone()
    }
}

fn print_snapshot(snapshot: &GameStateSnapshot) {
    println!(
        "\nRound {} - {} ({} alive)",
        snapshot.round_number,
        snapshot.current_phase,
        snapshot.alive_count()
    );
    for player in &snapshot.player_state {
        let team = if is_evil_role(&player.character) {
            "evil"
        } else {
            "good"
        };
        let mut flags = String::new();
        if !player.alive {
            flags.push_str(" dead");
            if player.used_dead_vote {
                flags.push_str(" (vote spent)");
            }
        }
        if player.is_poisoned() {
            flags.push_str(" poisoned");
        }
        if player.is_drunk() {
            flags.push_str(" drunk");
        }
        println!(
            "  {:<12} {:<16} {team}{flags}",
            player.name,
            display_name(&player.character),
        );
    }

    match &snapshot.chopping_block {
        Some(block) => println!(
            "Chopping block: {} ({} votes)",
            block.nominee, block.votes
        ),
        None => println!("Chopping block: empty"),
    }
    if snapshot.nominations_open {
        println!(
            "Nominations open: {}",
            snapshot.nominatable_players.join(", ")
        );
    } else {
        println!("Nominations closed");
    }
}
