//! The action protocol — the single entry point into the store.
//!
//! Player-issued and background-issued actions share one enum. Variants
//! are added per feature and never removed or reordered; the serde tag
//! keeps the wire form stable for save files and tooling.

use crate::{
    state::{Candidate, Company, GameState, Notification, SavedGame},
    types::EntityId,
};
use serde::{Deserialize, Serialize};

/// Narrative fields delivered by the enrichment pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeContent {
    pub name: String,
    pub skills: Vec<String>,
    pub personality: crate::state::Personality,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    // ── Hiring ─────────────────────────────────────
    HireEmployee {
        candidate: Candidate,
    },
    FireEmployee {
        employee_id: EntityId,
    },
    RevealResume {
        candidate_id: EntityId,
        fee: f64,
    },
    /// Dispatched by the enrichment worker, never by the player.
    UpdateResumeContent {
        candidate_id: EntityId,
        content: ResumeContent,
    },

    // ── Day clock ──────────────────────────────────
    AdvanceDay,
    /// Dispatched by the day-finalisation worker once candidate
    /// enrichment settles.
    DayAdvanceComplete {
        company: Company,
        candidate_pool: Vec<Candidate>,
    },

    // ── Training and events ────────────────────────
    StartTraining {
        employee_id: EntityId,
        program_id: EntityId,
    },
    HandleEvent {
        event_id: EntityId,
        choice_index: usize,
    },

    // ── Meta ───────────────────────────────────────
    SaveGame {
        saved_game: SavedGame,
    },
    LoadGame {
        state: Box<GameState>,
    },
    EndGame,
    SetGameSpeed {
        multiplier: f64,
    },
    AddNotification {
        notification: Notification,
    },
}

impl Action {
    /// Stable name for logging and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HireEmployee { .. } => "hire_employee",
            Self::FireEmployee { .. } => "fire_employee",
            Self::RevealResume { .. } => "reveal_resume",
            Self::UpdateResumeContent { .. } => "update_resume_content",
            Self::AdvanceDay => "advance_day",
            Self::DayAdvanceComplete { .. } => "day_advance_complete",
            Self::StartTraining { .. } => "start_training",
            Self::HandleEvent { .. } => "handle_event",
            Self::SaveGame { .. } => "save_game",
            Self::LoadGame { .. } => "load_game",
            Self::EndGame => "end_game",
            Self::SetGameSpeed { .. } => "set_game_speed",
            Self::AddNotification { .. } => "add_notification",
        }
    }
}
