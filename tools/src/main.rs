//! game-runner: headless driver for the company simulation.
//!
//! Usage:
//!   game-runner --seed 12345 --days 90 --db saves.db
//!   game-runner --days 30 --ollama http://localhost:11434 --model llama2

use anyhow::Result;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tycoon_core::{
    actions::Action,
    candidates,
    enrichment::{OfflineGenerator, OllamaClient, TextGenerator},
    rng::GameRng,
    saves::SaveStore,
    state::{GameState, SavedGame},
    store::GameStore,
};

const DAY_TIMEOUT: Duration = Duration::from_secs(60);

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 90u64);
    let db = string_arg(&args, "--db");
    let ollama = string_arg(&args, "--ollama");
    let model = string_arg(&args, "--model").unwrap_or_else(|| "llama2".to_string());

    println!("Capitalist Desk - game-runner");
    println!("  seed:   {seed}");
    println!("  days:   {days}");
    println!("  db:     {}", db.as_deref().unwrap_or("(none)"));
    println!("  ollama: {}", ollama.as_deref().unwrap_or("(offline)"));
    println!();

    let generator: Arc<dyn TextGenerator> = match &ollama {
        Some(url) => Arc::new(OllamaClient::new(url.clone(), model)),
        None => Arc::new(OfflineGenerator),
    };
    let mut store = GameStore::with_rng(generator, GameRng::seeded(seed));
    let mut pilot = GameRng::seeded(seed ^ 0x5eed);

    for _ in 0..days {
        store.dispatch(Action::AdvanceDay);
        if !store.wait_for_day(DAY_TIMEOUT) {
            log::warn!("day finalisation timed out, continuing");
        }
        if !store.state().is_running {
            break;
        }
        autopilot(&mut store, &mut pilot);
        store.pump();
    }

    print_summary(store.state());

    if let Some(path) = db {
        let save_store = SaveStore::open(&path)?;
        let save = SavedGame {
            id: uuid_like(seed, store.state().company.day),
            name: format!("Run seed {seed}"),
            date: chrono::Utc::now().timestamp_millis(),
            state: store.state().clone(),
        };
        save_store.append(&save)?;
        println!("saved run to {path} as slot {}", save.id);
    }

    Ok(())
}

/// A tiny policy that exercises the reveal/hire/train/event paths so a
/// headless run touches the whole pipeline.
fn autopilot(store: &mut GameStore, rng: &mut GameRng) {
    // Answer any pending event with a random choice.
    if let Some(event) = store.state().company.active_events.first().cloned() {
        let choice_index = rng.below(event.choices.len() as u64) as usize;
        store.dispatch(Action::HandleEvent {
            event_id: event.id,
            choice_index,
        });
    }

    // Reveal the most promising unrevealed resume, then hire revealed
    // candidates while the company can afford them.
    let best_hidden = store
        .state()
        .available_resumes
        .iter()
        .filter(|c| !c.is_revealed)
        .max_by(|a, b| candidates::score(a).total_cmp(&candidates::score(b)))
        .cloned();
    if let Some(candidate) = best_hidden {
        let fee = candidate.profile.experience.headhunting_fee();
        if store.state().company.capital > fee * 4.0 {
            store.dispatch(Action::RevealResume {
                candidate_id: candidate.id().to_string(),
                fee,
            });
            store.pump();
        }
    }

    let revealed: Vec<_> = store
        .state()
        .available_resumes
        .iter()
        .filter(|c| c.is_revealed)
        .cloned()
        .collect();
    for candidate in revealed {
        if store.state().company.capital > candidate.profile.salary * 2.0 {
            store.dispatch(Action::HireEmployee { candidate });
        }
    }

    // Occasionally send somebody to training.
    if rng.chance(0.1) {
        let first_employee = store
            .state()
            .company
            .employees
            .first()
            .map(|e| e.id.clone());
        if let Some(employee_id) = first_employee {
            store.dispatch(Action::StartTraining {
                employee_id,
                program_id: "basic_programming".to_string(),
            });
        }
    }
}

fn print_summary(state: &GameState) {
    let company = &state.company;
    println!();
    println!("=== run summary ===");
    println!("  day:        {}", company.day);
    println!("  capital:    {:.0}", company.capital);
    println!("  reputation: {:.0}", company.reputation);
    println!("  headcount:  {}", company.employees.len());
    println!("  income:     {:.0}/day", company.daily_income);
    println!("  expenses:   {:.0}/day", company.daily_expenses);
    println!("  running:    {}", state.is_running);
    for achievement in &company.achievements {
        let mark = if achievement.unlocked { "x" } else { " " };
        println!(
            "  [{mark}] {} ({:.0}/{:.0})",
            achievement.name, achievement.progress, achievement.target
        );
    }
    for employee in &company.employees {
        println!(
            "  - {} ({}, eff {:.2}, happy {:.0}, slack {:.0})",
            employee.name,
            employee.experience.label(),
            employee.efficiency,
            employee.happiness,
            employee.slacking,
        );
    }
}

fn parse_arg(args: &[String], flag: &str, default: u64) -> u64 {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}

fn uuid_like(seed: u64, day: u64) -> String {
    format!("run-{seed}-day-{day}")
}
