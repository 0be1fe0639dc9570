//! Achievement tracking — pure progress recomputation.
//!
//! Unlocking is one-way: once `unlocked` is set it is never cleared or
//! re-evaluated, whatever the snapshot does afterwards. The crisis_manager
//! achievement is event-driven (its progress is bumped by the HandleEvent
//! transition) and is only threshold-checked here.

use crate::state::{Achievement, Company};

pub const FIRST_HIRE: &str = "first_hire";
pub const TEAM_BUILDER: &str = "team_builder";
pub const MILLIONAIRE: &str = "millionaire";
pub const TRAINING_MASTER: &str = "training_master";
pub const CRISIS_MANAGER: &str = "crisis_manager";

fn entry(id: &str, name: &str, description: &str, target: f64) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        target,
        progress: 0.0,
        unlocked: false,
    }
}

/// The fixed achievement catalog a new game starts with.
pub fn catalog() -> Vec<Achievement> {
    vec![
        entry(FIRST_HIRE, "First Hire", "Hire your first employee", 1.0),
        entry(TEAM_BUILDER, "Team Builder", "Employ 10 people at once", 10.0),
        entry(
            MILLIONAIRE,
            "Millionaire",
            "Grow company capital to 1,000,000",
            1_000_000.0,
        ),
        entry(
            TRAINING_MASTER,
            "Training Master",
            "Enroll employees in training 50 times",
            50.0,
        ),
        entry(
            CRISIS_MANAGER,
            "Crisis Manager",
            "Handle 10 company crises",
            10.0,
        ),
    ]
}

/// Recompute progress for every not-yet-unlocked achievement from the
/// snapshot and apply the one-way unlock transition.
pub fn recompute(company: &Company) -> Vec<Achievement> {
    company
        .achievements
        .iter()
        .map(|achievement| {
            if achievement.unlocked {
                return achievement.clone();
            }

            let progress = match achievement.id.as_str() {
                FIRST_HIRE | TEAM_BUILDER => company.employees.len() as f64,
                MILLIONAIRE => company.capital,
                TRAINING_MASTER => company.total_training_enrollments as f64,
                // crisis_manager progress advances in HandleEvent
                _ => achievement.progress,
            };

            Achievement {
                progress,
                unlocked: progress >= achievement.target,
                ..achievement.clone()
            }
        })
        .collect()
}
