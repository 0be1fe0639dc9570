//! Hiring-flow tests — reveal fees, hire gating, and firing fallout.

use tycoon_core::{
    actions::Action,
    candidates,
    rng::GameRng,
    state::{Candidate, GameState},
    store::reduce,
};

fn state_with_pool(seed: u64, count: usize) -> (GameState, GameRng) {
    let mut rng = GameRng::seeded(seed);
    let mut state = GameState::new();
    state.available_resumes = candidates::generate_many(&mut rng, count);
    (state, rng)
}

fn revealed(candidate: &Candidate) -> Candidate {
    let mut c = candidate.clone();
    c.is_revealed = true;
    c
}

/// Paying the fee reveals exactly one candidate and charges exactly
/// the fee, once.
#[test]
fn reveal_charges_the_fee_exactly_once() {
    let (state, mut rng) = state_with_pool(21, 2);
    let candidate_id = state.available_resumes[0].id().to_string();
    let fee = state.available_resumes[0].profile.experience.headhunting_fee();
    let capital_before = state.company.capital;

    let state = reduce(
        state,
        Action::RevealResume {
            candidate_id: candidate_id.clone(),
            fee,
        },
        &mut rng,
    );
    assert!(state.candidate(&candidate_id).is_some_and(|c| c.is_revealed));
    assert!((state.company.capital - (capital_before - fee)).abs() < 1e-9);

    // A second reveal of the same candidate is a no-op.
    let state = reduce(
        state,
        Action::RevealResume {
            candidate_id: candidate_id.clone(),
            fee,
        },
        &mut rng,
    );
    assert!((state.company.capital - (capital_before - fee)).abs() < 1e-9);
}

/// Without the funds the reveal is refused: no charge, no reveal, an
/// error notification instead.
#[test]
fn reveal_without_funds_is_refused() {
    let (mut state, mut rng) = state_with_pool(22, 1);
    state.company.capital = 0.5;
    let candidate_id = state.available_resumes[0].id().to_string();

    let state = reduce(
        state,
        Action::RevealResume {
            candidate_id: candidate_id.clone(),
            fee: 1_000.0,
        },
        &mut rng,
    );

    assert_eq!(state.company.capital, 0.5);
    assert!(state.candidate(&candidate_id).is_some_and(|c| !c.is_revealed));
    assert!(!state.notifications.is_empty());
}

/// Revealing an id that is not in the pool changes nothing.
#[test]
fn reveal_of_unknown_candidate_is_a_noop() {
    let (state, mut rng) = state_with_pool(23, 1);
    let capital_before = state.company.capital;
    let state = reduce(
        state,
        Action::RevealResume {
            candidate_id: "no-such-candidate".to_string(),
            fee: 1_000.0,
        },
        &mut rng,
    );
    assert_eq!(state.company.capital, capital_before);
}

/// An unrevealed candidate cannot be hired; the roster and the pool
/// are untouched and a warning is raised.
#[test]
fn hiring_an_unrevealed_candidate_is_refused() {
    let (state, mut rng) = state_with_pool(24, 1);
    let candidate = state.available_resumes[0].clone();
    assert!(!candidate.is_revealed);

    let state = reduce(state, Action::HireEmployee { candidate }, &mut rng);

    assert!(state.company.employees.is_empty());
    assert_eq!(state.available_resumes.len(), 1);
    assert!(!state.notifications.is_empty());
}

/// A successful hire moves the candidate out of the pool, resets the
/// new hire's morale, and unlocks the first-hire achievement.
#[test]
fn successful_hire_moves_candidate_to_roster() {
    let (state, mut rng) = state_with_pool(25, 2);
    let candidate = revealed(&state.available_resumes[0]);
    let candidate_id = candidate.id().to_string();

    let state = reduce(state, Action::HireEmployee { candidate }, &mut rng);

    assert_eq!(state.company.employees.len(), 1);
    assert_eq!(state.available_resumes.len(), 1);
    assert!(state.candidate(&candidate_id).is_none());

    let hired = &state.company.employees[0];
    assert_eq!(hired.id, candidate_id);
    assert_eq!(hired.happiness, 80.0);
    assert_eq!(hired.days_employed, 0);

    let first_hire = state
        .company
        .achievements
        .iter()
        .find(|a| a.id == "first_hire")
        .unwrap();
    assert!(first_hire.unlocked);
}

/// Hiring is refused when the salary exceeds the capital on hand.
#[test]
fn hire_without_funds_is_refused() {
    let (mut state, mut rng) = state_with_pool(26, 1);
    state.company.capital = 100.0;
    let candidate = revealed(&state.available_resumes[0]);

    let state = reduce(state, Action::HireEmployee { candidate }, &mut rng);

    assert!(state.company.employees.is_empty());
    assert_eq!(state.available_resumes.len(), 1);
}

/// Firing removes exactly one employee and costs exactly five
/// reputation, floored at zero.
#[test]
fn firing_costs_reputation() {
    let (mut state, mut rng) = state_with_pool(27, 0);
    for _ in 0..2 {
        state
            .company
            .employees
            .push(candidates::generate(&mut rng).into_employee());
    }
    let victim = state.company.employees[0].id.clone();

    let state = reduce(
        state,
        Action::FireEmployee {
            employee_id: victim.clone(),
        },
        &mut rng,
    );
    assert_eq!(state.company.employees.len(), 1);
    assert!(state.company.employee(&victim).is_none());
    assert_eq!(state.company.reputation, 45.0);

    // The floor: firing from zero reputation stays at zero.
    let mut state = state;
    state.company.reputation = 2.0;
    let survivor = state.company.employees[0].id.clone();
    let state = reduce(
        state,
        Action::FireEmployee {
            employee_id: survivor,
        },
        &mut rng,
    );
    assert_eq!(state.company.reputation, 0.0);
}

/// Firing an unknown id leaves the roster and reputation alone.
#[test]
fn firing_an_unknown_id_is_a_noop() {
    let (mut state, mut rng) = state_with_pool(28, 0);
    state
        .company
        .employees
        .push(candidates::generate(&mut rng).into_employee());

    let state = reduce(
        state,
        Action::FireEmployee {
            employee_id: "ghost".to_string(),
        },
        &mut rng,
    );
    assert_eq!(state.company.employees.len(), 1);
    assert_eq!(state.company.reputation, 50.0);
}
