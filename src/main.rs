//! Headless runner for the Click & Hide core.
//!
//! There is no rendering here: the binary wires a save file, the game
//! context and (optionally) the scripted autoplay pilot into the
//! fixed-rate frame loop, and reports progress through the log.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use click_and_hide::autoplay::AutoPilot;
use click_and_hide::game::Game;
use click_and_hide::player::format_money;
use click_and_hide::save::{SaveGateway, SAVE_FILE};
use click_and_hide::time::{Clock, FrameClock};

const FRAMES_PER_SEC: u32 = 60;

/// Frames between progress reports (~5 seconds).
const REPORT_EVERY: u64 = 300;

#[derive(Parser, Debug)]
#[command(name = "click-and-hide", about = "Headless idle-clicker core with a scripted demo mode")]
struct Args {
    /// Drive the game with the scripted autoplay pilot
    #[arg(long)]
    demo: bool,

    /// Seconds to run before saving and exiting
    #[arg(long, default_value_t = 30)]
    seconds: u64,

    /// Save file path
    #[arg(long, default_value = SAVE_FILE)]
    save: PathBuf,

    /// Discard any existing save and start over
    #[arg(long)]
    new_game: bool,

    /// Demo click rate, attempts per second
    #[arg(long, default_value_t = 5.0)]
    click_rate: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let clock = Clock::new();

    let mut game = Game::new(SaveGateway::new(&args.save), clock.now());
    if args.new_game {
        game.new_game(clock.now());
    }

    if !args.demo {
        info!(
            money = %format_money(game.player.money),
            total_clicks = game.player.total_clicks,
            "core is headless; pass --demo to drive it with the autoplay pilot"
        );
        return;
    }

    info!(
        seconds = args.seconds,
        click_rate = args.click_rate,
        save = %args.save.display(),
        "demo mode starting"
    );

    let mut pilot = AutoPilot::new(args.click_rate, clock.now());
    let mut frames = FrameClock::new(FRAMES_PER_SEC);
    let run_for = args.seconds as f64;
    let mut last_report = 0u64;

    loop {
        let now = clock.now();
        if now >= run_for {
            break;
        }

        for _ in 0..frames.update(now) {
            pilot.drive(&mut game, now);
            game.update(now);
            game.pending_notifications(now);
        }

        if frames.total_frames >= last_report + REPORT_EVERY {
            last_report = frames.total_frames;
            info!(
                money = %format_money(game.player.money),
                clicks = game.player.total_clicks,
                per_click = game.player.click_income,
                per_sec = game.player.auto_income,
                upgrades = game.player.upgrades_bought,
                "progress"
            );
        }

        thread::sleep(Duration::from_millis(5));
    }

    info!(
        money = %format_money(game.player.money),
        total_clicks = game.player.total_clicks,
        upgrades = game.player.upgrades_bought,
        achievements = game.achievements.unlocked_names().len(),
        "demo finished"
    );
}
