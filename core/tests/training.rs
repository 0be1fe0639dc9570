//! Training-flow tests — enrollment charging, the cumulative counter,
//! and completion payout through day ticks.

use tycoon_core::{
    actions::Action,
    candidates,
    rng::GameRng,
    state::GameState,
    store::reduce,
    training,
};

fn state_with_staff(seed: u64, count: usize) -> (GameState, GameRng) {
    let mut rng = GameRng::seeded(seed);
    let mut state = GameState::new();
    for _ in 0..count {
        state
            .company
            .employees
            .push(candidates::generate(&mut rng).into_employee());
    }
    (state, rng)
}

/// Starting a program charges its cost up front and bumps the
/// cumulative enrollment counter.
#[test]
fn starting_training_charges_and_counts() {
    let (state, mut rng) = state_with_staff(51, 1);
    let employee_id = state.company.employees[0].id.clone();
    let capital_before = state.company.capital;
    let cost = training::template_by_id("basic_programming").unwrap().cost;

    let state = reduce(
        state,
        Action::StartTraining {
            employee_id,
            program_id: "basic_programming".to_string(),
        },
        &mut rng,
    );

    assert_eq!(state.company.training_programs.len(), 1);
    assert!((state.company.capital - (capital_before - cost)).abs() < 1e-9);
    assert_eq!(state.company.total_training_enrollments, 1);
}

/// Unknown employees and unknown program templates both refuse the
/// enrollment without charging.
#[test]
fn invalid_enrollments_are_refused() {
    let (state, mut rng) = state_with_staff(52, 1);
    let employee_id = state.company.employees[0].id.clone();
    let capital_before = state.company.capital;

    let state = reduce(
        state,
        Action::StartTraining {
            employee_id: "ghost".to_string(),
            program_id: "basic_programming".to_string(),
        },
        &mut rng,
    );
    let state = reduce(
        state,
        Action::StartTraining {
            employee_id,
            program_id: "underwater_basket_weaving".to_string(),
        },
        &mut rng,
    );

    assert!(state.company.training_programs.is_empty());
    assert_eq!(state.company.capital, capital_before);
    assert_eq!(state.company.total_training_enrollments, 0);
}

/// Enrollment is refused when the capital cannot cover the cost.
#[test]
fn training_without_funds_is_refused() {
    let (mut state, mut rng) = state_with_staff(53, 1);
    state.company.capital = 100.0;
    let employee_id = state.company.employees[0].id.clone();

    let state = reduce(
        state,
        Action::StartTraining {
            employee_id,
            program_id: "leadership".to_string(),
        },
        &mut rng,
    );

    assert!(state.company.training_programs.is_empty());
    assert_eq!(state.company.capital, 100.0);
}

/// After `duration` ticks the program completes: the enrolled employee
/// gains the efficiency bonus and the taught skill, and the program is
/// removed. The cumulative counter does not regress.
#[test]
fn completion_pays_out_after_duration_days() {
    let (mut state, mut rng) = state_with_staff(54, 1);
    state.company.capital = 1_000_000.0; // keep insolvency out of the picture
    state.company.employees[0].efficiency = 0.4;
    state.company.employees[0].skills.clear();
    let employee_id = state.company.employees[0].id.clone();

    state = reduce(
        state,
        Action::StartTraining {
            employee_id: employee_id.clone(),
            program_id: "marketing_strategy".to_string(),
        },
        &mut rng,
    );
    let duration = state.company.training_programs[0].duration;

    for _ in 0..duration {
        state = reduce(state, Action::AdvanceDay, &mut rng);
        state.is_processing_day = false; // tick inline, no worker
    }

    assert!(state.company.training_programs.is_empty());
    let trained = state.company.employee(&employee_id).unwrap();
    assert!(trained.skills.contains(&"Marketing".to_string()));
    // 0.08 bonus minus four days of small decay still lands well above
    // the starting 0.4.
    assert!(trained.efficiency > 0.45);
    assert_eq!(state.company.total_training_enrollments, 1);
}

/// A program whose enrollee was fired mid-course still completes and
/// disappears without touching anyone else.
#[test]
fn training_survives_losing_its_enrollee() {
    let (mut state, mut rng) = state_with_staff(55, 2);
    state.company.capital = 1_000_000.0;
    let enrollee = state.company.employees[0].id.clone();
    let bystander = state.company.employees[1].id.clone();

    state = reduce(
        state,
        Action::StartTraining {
            employee_id: enrollee.clone(),
            program_id: "marketing_strategy".to_string(),
        },
        &mut rng,
    );
    state = reduce(
        state,
        Action::FireEmployee {
            employee_id: enrollee,
        },
        &mut rng,
    );
    let bystander_skills = state
        .company
        .employee(&bystander)
        .unwrap()
        .skills
        .clone();

    for _ in 0..4 {
        state = reduce(state, Action::AdvanceDay, &mut rng);
        state.is_processing_day = false;
    }

    assert!(state.company.training_programs.is_empty());
    assert_eq!(
        state.company.employee(&bystander).unwrap().skills,
        bystander_skills
    );
}
