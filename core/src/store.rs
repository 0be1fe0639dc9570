//! The world state store — the sole mutation surface.
//!
//! `GameStore` owns exactly one current snapshot. Every change goes
//! through `dispatch`, which feeds the pure reducer and atomically swaps
//! the root to the result; readers only ever see a fully applied
//! transition. Background workers (enrichment, day finalisation) receive
//! a cloned sender and communicate exclusively by dispatching follow-up
//! actions, drained via `pump`.
//!
//! EXECUTION ORDER of a day tick (fixed, never reordered):
//!   1. expenses        (salaries/30 + training amortisation)
//!   2. income          (base + reputation-scaled employee sum)
//!   3. capital, day
//!   4. per-employee drift (happiness, slacking, efficiency)
//!   5. event roll      (15%, only when none pending)
//!   6. pool aging and eviction
//!   7. pool replenishment, truncated to 3
//!   then training advancement, achievement recompute, and the
//!   processing flag; a worker finalises the pool asynchronously.

use crate::{
    achievements,
    actions::{Action, ResumeContent},
    candidates, economy,
    enrichment::{self, TextGenerator},
    events,
    rng::GameRng,
    state::{
        Candidate, Company, GameState, Notification, SavedGame, Severity, MAX_CANDIDATES,
    },
    training,
};
use std::sync::{
    mpsc::{channel, Receiver, Sender, TryRecvError},
    Arc,
};
use std::time::{Duration, Instant};

pub struct GameStore {
    state: GameState,
    rng: GameRng,
    generator: Arc<dyn TextGenerator>,
    tx: Sender<Action>,
    rx: Receiver<Action>,
}

impl GameStore {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_rng(generator, GameRng::from_entropy())
    }

    /// Seeded store for tests and the runner's `--seed` flag.
    pub fn with_rng(generator: Arc<dyn TextGenerator>, rng: GameRng) -> Self {
        let (tx, rx) = channel();
        Self {
            state: GameState::new(),
            rng,
            generator,
            tx,
            rx,
        }
    }

    /// Synchronous read of the current snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A sender background work can use to dispatch follow-up actions.
    pub fn sender(&self) -> Sender<Action> {
        self.tx.clone()
    }

    /// The single entry point. Applies the transition and kicks off any
    /// background work the action implies.
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch {}", action.name());

        // Post-reduce hooks need to know what ran; captured before the
        // action is consumed.
        let was_advance_day = matches!(action, Action::AdvanceDay);
        let was_day_complete = matches!(action, Action::DayAdvanceComplete { .. });
        let revealed_candidate = match &action {
            Action::RevealResume { candidate_id, .. } => Some(candidate_id.clone()),
            _ => None,
        };

        if was_advance_day && self.state.is_processing_day {
            log::warn!("advance_day ignored: previous day still finalising");
            return;
        }

        let previous = std::mem::take(&mut self.state);
        self.state = reduce(previous, action, &mut self.rng);

        if was_advance_day {
            enrichment::spawn_day_finalisation(
                self.generator.clone(),
                self.state.company.clone(),
                self.state.available_resumes.clone(),
                self.tx.clone(),
            );
        }

        if let Some(candidate_id) = revealed_candidate {
            // Only a successful reveal spawns enrichment; the worker
            // itself skips candidates that already carry content.
            if let Some(candidate) = self.state.candidate(&candidate_id) {
                if candidate.is_revealed {
                    enrichment::spawn_candidate_enrichment(
                        self.generator.clone(),
                        candidate.clone(),
                        self.tx.clone(),
                    );
                }
            }
        }

        // Insolvency is terminal: a tick that leaves capital negative
        // forces the end-of-game transition (with its auto-save).
        if (was_advance_day || was_day_complete)
            && self.state.company.capital < 0.0
            && self.state.is_running
        {
            log::info!(
                "capital {:.0} after day {}: company is insolvent",
                self.state.company.capital,
                self.state.company.day
            );
            self.dispatch(Action::EndGame);
        }
    }

    /// Drain any queued background actions without blocking.
    pub fn pump(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(action) => self.dispatch(action),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return,
            }
        }
    }

    /// Block until the in-flight day finalisation lands (or the timeout
    /// passes). Returns true once the processing flag is clear.
    pub fn wait_for_day(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.state.is_processing_day {
            let remaining = match deadline.checked_duration_since(Instant::now()) {
                Some(d) if !d.is_zero() => d,
                _ => return false,
            };
            match self.rx.recv_timeout(remaining) {
                Ok(action) => self.dispatch(action),
                Err(_) => return false,
            }
        }
        true
    }
}

/// True for actions that read-modify the company and therefore must not
/// interleave with an in-flight day finalisation: the worker's payload
/// would overwrite their effect when `DayAdvanceComplete` lands.
fn blocked_while_processing(action: &Action) -> bool {
    matches!(
        action,
        Action::AdvanceDay
            | Action::HireEmployee { .. }
            | Action::FireEmployee { .. }
            | Action::RevealResume { .. }
            | Action::StartTraining { .. }
            | Action::HandleEvent { .. }
    )
}

/// The pure transition function: previous snapshot + action = next
/// snapshot. No I/O, no threads; all randomness comes from `rng`.
pub fn reduce(state: GameState, action: Action, rng: &mut GameRng) -> GameState {
    if state.is_processing_day && blocked_while_processing(&action) {
        log::warn!("{} ignored: day finalisation in flight", action.name());
        return state;
    }

    match action {
        Action::HireEmployee { candidate } => hire_employee(state, candidate),
        Action::FireEmployee { employee_id } => fire_employee(state, &employee_id),
        Action::RevealResume { candidate_id, fee } => reveal_resume(state, &candidate_id, fee),
        Action::UpdateResumeContent {
            candidate_id,
            content,
        } => update_resume_content(state, &candidate_id, content),
        Action::AdvanceDay => advance_day(state, rng),
        Action::DayAdvanceComplete {
            company,
            candidate_pool,
        } => day_advance_complete(state, company, candidate_pool),
        Action::StartTraining {
            employee_id,
            program_id,
        } => start_training(state, &employee_id, &program_id),
        Action::HandleEvent {
            event_id,
            choice_index,
        } => handle_event(state, &event_id, choice_index, rng),
        Action::SaveGame { saved_game } => save_game(state, saved_game),
        Action::LoadGame { state: loaded } => *loaded,
        Action::EndGame => end_game(state),
        Action::SetGameSpeed { multiplier } => set_game_speed(state, multiplier),
        Action::AddNotification { notification } => {
            let mut state = state;
            state.notify(notification);
            state
        }
    }
}

// ── Hiring ─────────────────────────────────────────────────────────

fn hire_employee(mut state: GameState, candidate: Candidate) -> GameState {
    if !candidate.is_revealed {
        state.notify(Notification::new(
            Severity::Warning,
            "Reveal the resume before making an offer",
        ));
        return state;
    }
    if state.company.capital < candidate.profile.salary {
        state.notify(Notification::new(
            Severity::Error,
            "Insufficient funds to hire",
        ));
        return state;
    }

    let candidate_id = candidate.id().to_string();
    let name = candidate.profile.name.clone();
    state.company.employees.push(candidate.into_employee());
    state
        .available_resumes
        .retain(|resume| resume.id() != candidate_id);
    state.notify(Notification::new(
        Severity::Success,
        format!("Hired {name}"),
    ));
    let recomputed = achievements::recompute(&state.company);
    state.company.achievements = recomputed;
    state
}

fn fire_employee(mut state: GameState, employee_id: &str) -> GameState {
    let before = state.company.employees.len();
    state.company.employees.retain(|e| e.id != employee_id);
    if state.company.employees.len() == before {
        // Unknown id: snapshot unchanged.
        return state;
    }
    state.company.reputation = (state.company.reputation - 5.0).max(0.0);
    state
}

fn reveal_resume(mut state: GameState, candidate_id: &str, fee: f64) -> GameState {
    let Some(index) = state
        .available_resumes
        .iter()
        .position(|c| c.id() == candidate_id)
    else {
        return state;
    };
    if state.available_resumes[index].is_revealed {
        // Re-revealing never charges twice.
        return state;
    }
    if state.company.capital < fee {
        state.notify(Notification::new(
            Severity::Error,
            "Insufficient funds for the headhunting fee",
        ));
        return state;
    }

    state.available_resumes[index].is_revealed = true;
    state.company.capital -= fee;
    state.notify(Notification::new(
        Severity::Success,
        "Headhunting fee paid, resume unlocked",
    ));
    state
}

fn update_resume_content(
    mut state: GameState,
    candidate_id: &str,
    content: ResumeContent,
) -> GameState {
    // Re-resolve against the *current* snapshot: the candidate may have
    // been hired, fired, or evicted while the request was in flight.
    let Some(candidate) = state
        .available_resumes
        .iter_mut()
        .find(|c| c.id() == candidate_id)
    else {
        return state;
    };
    if candidate.profile.personality.is_some() {
        // First committed enrichment wins; later deliveries are dropped.
        return state;
    }

    candidate.profile.name = content.name;
    candidate.profile.skills = content.skills;
    candidate.profile.personality = Some(content.personality);
    state
}

// ── The day tick ───────────────────────────────────────────────────

fn advance_day(mut state: GameState, rng: &mut GameRng) -> GameState {
    let company = &mut state.company;

    // 1-3: the economic step, computed from the pre-drift snapshot.
    company.daily_expenses = economy::daily_expenses(company);
    company.daily_income = economy::daily_income(company);
    company.capital += company.daily_income - company.daily_expenses;
    company.day += 1;

    // 4: per-employee stochastic drift.
    for employee in &mut company.employees {
        employee.days_employed += 1;
        employee.happiness += rng.range_f64(-2.5, 1.5);
        employee.clamp();

        let mut slacking_delta = 0.0;
        if employee.happiness < 60.0 {
            slacking_delta += 3.0;
        } else if employee.happiness > 85.0 {
            slacking_delta -= 1.0;
        }
        if employee.days_employed > 20 {
            slacking_delta += 1.5;
        }
        if employee.days_employed > 40 {
            slacking_delta += 1.5;
        }
        slacking_delta += rng.range_f64(-1.5, 1.5);
        let market = economy::market_salary(employee.experience, employee.education);
        if employee.salary < market * 0.9 {
            slacking_delta += 2.0;
        }
        employee.slacking += slacking_delta;

        // Efficiency decays slowly; the clamp floors it at 0.3.
        employee.efficiency -= rng.range_f64(0.001, 0.003);
        employee.clamp();
    }

    // 5: at most one pending event.
    if company.active_events.is_empty() && rng.chance(events::EVENT_CHANCE_PER_DAY) {
        let event = events::draw(rng);
        log::info!("event triggered on day {}: {}", company.day, event.title);
        company.active_events.push(event);
    }

    // Training runs on the day clock too.
    let training_notes = training::advance_one_day(company);

    // 6: age the pool, evict stale entries, then the flat survival roll.
    let mut pool: Vec<Candidate> = std::mem::take(&mut state.available_resumes);
    for candidate in &mut pool {
        candidate.days_in_pool += 1;
    }
    pool.retain(|candidate| candidate.days_in_pool < 2 && rng.chance(0.3));

    // 7: replenish, newest kept, truncated to the pool cap.
    if rng.chance(0.5) {
        let count = rng.range_u64(1, 2) as usize;
        pool.extend(candidates::generate_many(rng, count));
    }
    if pool.len() > MAX_CANDIDATES {
        let excess = pool.len() - MAX_CANDIDATES;
        pool.drain(..excess);
    }
    state.available_resumes = pool;

    let recomputed = achievements::recompute(&state.company);
    state.company.achievements = recomputed;
    for note in training_notes {
        state.notify(note);
    }

    // 8: the intermediate snapshot; a worker dispatches
    // DayAdvanceComplete once enrichment settles.
    state.is_processing_day = true;
    state
}

fn day_advance_complete(
    mut state: GameState,
    company: Company,
    candidate_pool: Vec<Candidate>,
) -> GameState {
    if !state.is_processing_day {
        // Stale delivery: the snapshot it finalises was already replaced
        // (LoadGame) or acknowledged. Dropping it is the only safe move.
        return state;
    }
    state.is_processing_day = false;
    if !state.is_running {
        // The game ended while the worker was in flight; nothing to
        // install.
        return state;
    }

    state.company = company;
    state.company.clamp();

    // Merge by identity: a candidate enriched through the reveal path
    // while the worker ran keeps its first-committed content.
    let previous = std::mem::take(&mut state.available_resumes);
    let mut pool = candidate_pool;
    for candidate in &mut pool {
        if let Some(existing) = previous
            .iter()
            .find(|c| c.id() == candidate.id() && c.profile.personality.is_some())
        {
            candidate.profile.name = existing.profile.name.clone();
            candidate.profile.skills = existing.profile.skills.clone();
            candidate.profile.personality = existing.profile.personality.clone();
        }
    }
    // Same tie-break as the tick: oldest-inserted entries go first.
    if pool.len() > MAX_CANDIDATES {
        let excess = pool.len() - MAX_CANDIDATES;
        pool.drain(..excess);
    }
    state.available_resumes = pool;
    state
}

// ── Training and events ────────────────────────────────────────────

fn start_training(mut state: GameState, employee_id: &str, program_id: &str) -> GameState {
    if state.company.employee(employee_id).is_none() {
        return state;
    }
    let Some(template) = training::template_by_id(program_id) else {
        return state;
    };
    if state.company.capital < template.cost {
        state.notify(Notification::new(
            Severity::Error,
            "Insufficient funds for training",
        ));
        return state;
    }

    state.company.capital -= template.cost;
    state
        .company
        .training_programs
        .push(training::enroll(&template, employee_id));
    state.company.total_training_enrollments += 1;
    state.notify(Notification::new(
        Severity::Success,
        format!("Training started: {}", template.name),
    ));
    let recomputed = achievements::recompute(&state.company);
    state.company.achievements = recomputed;
    state
}

fn handle_event(
    mut state: GameState,
    event_id: &str,
    choice_index: usize,
    rng: &mut GameRng,
) -> GameState {
    let Some(event) = state.company.active_events.first() else {
        return state;
    };
    if event.id != event_id || choice_index >= event.choices.len() {
        return state;
    }

    let choice = event.choices[choice_index].clone();
    let raised = events::apply_choice(&mut state.company, &choice, rng);
    // Exactly one pending event is supported; resolve and clear.
    state.company.active_events.clear();
    for note in raised {
        state.notify(note);
    }

    if let Some(crisis) = state
        .company
        .achievements
        .iter_mut()
        .find(|a| a.id == achievements::CRISIS_MANAGER && !a.unlocked)
    {
        crisis.progress += 1.0;
    }
    let recomputed = achievements::recompute(&state.company);
    state.company.achievements = recomputed;
    state
}

// ── Meta ───────────────────────────────────────────────────────────

fn save_game(mut state: GameState, saved_game: SavedGame) -> GameState {
    // Duplicate names are permitted; slots are keyed by id.
    state.saved_games.push(saved_game);
    state
}

fn end_game(mut state: GameState) -> GameState {
    if !state.is_running {
        return state;
    }
    state.is_running = false;

    let message = if state.company.capital < 0.0 {
        "The company is bankrupt. Game over"
    } else {
        "Game over"
    };
    state.notify(Notification::new(Severity::Info, message));

    // Auto-save the final state so the run can be inspected later.
    let final_save = SavedGame {
        id: uuid::Uuid::new_v4().to_string(),
        name: format!("Final save - day {}", state.company.day),
        date: chrono::Utc::now().timestamp_millis(),
        state: state.clone(),
    };
    state.saved_games.push(final_save);
    state
}

fn set_game_speed(mut state: GameState, multiplier: f64) -> GameState {
    state.game_speed = multiplier;
    state
}
