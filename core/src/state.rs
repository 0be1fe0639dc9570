//! The world snapshot — every value type that makes up one instant of the
//! simulated company.
//!
//! RULE: snapshots are immutable values. The reducer consumes the previous
//! snapshot and returns a wholly new one; no mutation leaks between
//! transitions. Clamp invariants are re-applied after every field change:
//!   - reputation, happiness, slacking in [0, 100]
//!   - efficiency in [0.3, 1.0]
//!   - at most one active event
//!   - at most 3 candidates in the pool
//!   - at most 5 notifications, oldest evicted first

use crate::types::{Day, EntityId, TimestampMs};
use serde::{Deserialize, Serialize};

pub const MAX_NOTIFICATIONS: usize = 5;
pub const MAX_CANDIDATES: usize = 3;

pub const EFFICIENCY_FLOOR: f64 = 0.3;
pub const EFFICIENCY_CEIL: f64 = 1.0;

// ── Tiers ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceTier {
    Junior,
    Mid,
    Senior,
}

impl ExperienceTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
        }
    }

    /// Output multiplier applied to an employee's daily contribution.
    pub fn income_multiplier(&self) -> f64 {
        match self {
            Self::Junior => 0.7,
            Self::Mid => 1.0,
            Self::Senior => 1.4,
        }
    }

    pub fn base_salary(&self) -> f64 {
        match self {
            Self::Junior => 8_000.0,
            Self::Mid => 15_000.0,
            Self::Senior => 30_000.0,
        }
    }

    /// Fee charged to reveal a candidate of this tier.
    pub fn headhunting_fee(&self) -> f64 {
        match self {
            Self::Junior => 1_000.0,
            Self::Mid => 2_000.0,
            Self::Senior => 4_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationTier {
    Bachelor,
    Master,
    Doctorate,
}

impl EducationTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bachelor => "bachelor",
            Self::Master => "master",
            Self::Doctorate => "doctorate",
        }
    }

    pub fn salary_multiplier(&self) -> f64 {
        match self {
            Self::Bachelor => 1.0,
            Self::Master => 1.3,
            Self::Doctorate => 1.8,
        }
    }
}

// ── People ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personality {
    pub traits: Vec<String>,
    pub work_attitude: String,
    pub career_plan: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EntityId,
    pub name: String,
    pub skills: Vec<String>,
    pub experience: ExperienceTier,
    pub education: EducationTier,
    pub salary: f64,
    pub efficiency: f64,
    pub happiness: f64,
    pub slacking: f64,
    pub days_employed: u64,
    pub personality: Option<Personality>,
}

impl Employee {
    /// Re-apply the range invariants after any mutation.
    pub fn clamp(&mut self) {
        self.salary = self.salary.max(0.0);
        self.efficiency = self.efficiency.clamp(EFFICIENCY_FLOOR, EFFICIENCY_CEIL);
        self.happiness = self.happiness.clamp(0.0, 100.0);
        self.slacking = self.slacking.clamp(0.0, 100.0);
    }
}

/// A pre-hire employee projection sitting in the resume pool.
///
/// Sensitive fields (salary, skills, personality) must never be surfaced
/// while `is_revealed` is false; presentation layers go through
/// [`Candidate::redacted_summary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub profile: Employee,
    pub days_in_pool: u64,
    pub is_revealed: bool,
}

impl Candidate {
    pub fn id(&self) -> &str {
        &self.profile.id
    }

    /// One-line description safe to show before the reveal fee is paid.
    pub fn redacted_summary(&self) -> String {
        if self.is_revealed {
            format!(
                "{} ({}, {}) - salary {:.0}, skills: {}",
                self.profile.name,
                self.profile.experience.label(),
                self.profile.education.label(),
                self.profile.salary,
                self.profile.skills.join(", "),
            )
        } else {
            format!(
                "{} ({}, {}) - [pay fee to reveal]",
                self.profile.name,
                self.profile.experience.label(),
                self.profile.education.label(),
            )
        }
    }

    /// Promote to an employee: pool-only fields are stripped and the
    /// new hire starts with fresh morale.
    pub fn into_employee(self) -> Employee {
        let mut employee = self.profile;
        employee.happiness = 80.0;
        employee.days_employed = 0;
        employee.clamp();
        employee
    }
}

// ── Achievements ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub target: f64,
    pub progress: f64,
    pub unlocked: bool,
}

// ── Events ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EventEffect {
    Capital(f64),
    Efficiency(f64),
    Happiness(f64),
    Reputation(f64),
    Layoff,
    Salary(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventChoice {
    pub text: String,
    pub effects: Vec<EventEffect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomEvent {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub choices: Vec<EventChoice>,
}

// ── Training ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingProgram {
    pub id: EntityId,
    pub name: String,
    pub skill: String,
    pub duration: u64,
    pub cost: f64,
    pub efficiency_bonus: f64,
    pub employees_enrolled: Vec<EntityId>,
    pub days_run: u64,
}

// ── Notifications ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: EntityId,
    pub severity: Severity,
    pub message: String,
    pub timestamp: TimestampMs,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            severity,
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

// ── Company and root snapshot ──────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub capital: f64,
    pub day: Day,
    pub daily_income: f64,
    pub daily_expenses: f64,
    pub reputation: f64,
    pub employees: Vec<Employee>,
    pub achievements: Vec<Achievement>,
    pub active_events: Vec<RandomEvent>,
    pub training_programs: Vec<TrainingProgram>,
    /// Cumulative count backing the training achievement. Programs are
    /// removed on completion, so a live sum would regress.
    pub total_training_enrollments: u32,
}

impl Company {
    pub fn clamp(&mut self) {
        self.reputation = self.reputation.clamp(0.0, 100.0);
        for employee in &mut self.employees {
            employee.clamp();
        }
        self.active_events.truncate(1);
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    pub id: EntityId,
    pub name: String,
    pub date: TimestampMs,
    pub state: GameState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub company: Company,
    pub available_resumes: Vec<Candidate>,
    pub is_running: bool,
    pub is_processing_day: bool,
    pub game_speed: f64,
    pub notifications: Vec<Notification>,
    pub saved_games: Vec<SavedGame>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            company: Company {
                capital: 10_000.0,
                day: 1,
                daily_income: 0.0,
                daily_expenses: 0.0,
                reputation: 50.0,
                employees: Vec::new(),
                achievements: crate::achievements::catalog(),
                active_events: Vec::new(),
                training_programs: Vec::new(),
                total_training_enrollments: 0,
            },
            available_resumes: Vec::new(),
            is_running: true,
            is_processing_day: false,
            game_speed: 1.0,
            notifications: Vec::new(),
            saved_games: Vec::new(),
        }
    }

    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.available_resumes.iter().find(|c| c.id() == id)
    }

    /// Push into the ring buffer, evicting the oldest beyond 5 entries.
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_evict_oldest_beyond_five() {
        let mut state = GameState::new();
        for i in 0..8 {
            state.notify(Notification::new(Severity::Info, format!("n{i}")));
        }
        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(state.notifications[0].message, "n3");
        assert_eq!(state.notifications[4].message, "n7");
    }

    #[test]
    fn employee_clamp_enforces_ranges() {
        let mut employee = Employee {
            id: "e1".into(),
            name: "Test".into(),
            skills: vec![],
            experience: ExperienceTier::Junior,
            education: EducationTier::Bachelor,
            salary: -10.0,
            efficiency: 1.7,
            happiness: 250.0,
            slacking: -3.0,
            days_employed: 0,
            personality: None,
        };
        employee.clamp();
        assert_eq!(employee.salary, 0.0);
        assert_eq!(employee.efficiency, 1.0);
        assert_eq!(employee.happiness, 100.0);
        assert_eq!(employee.slacking, 0.0);
    }

    #[test]
    fn redacted_summary_hides_sensitive_fields() {
        let mut state = GameState::new();
        let mut rng = crate::rng::GameRng::seeded(1);
        let candidate = crate::candidates::generate(&mut rng);
        state.available_resumes.push(candidate.clone());

        let hidden = candidate.redacted_summary();
        assert!(!hidden.contains(&format!("{:.0}", candidate.profile.salary)));
        for skill in &candidate.profile.skills {
            assert!(!hidden.contains(skill.as_str()));
        }

        let mut revealed = candidate;
        revealed.is_revealed = true;
        assert!(revealed.redacted_summary().contains("salary"));
    }
}
