//! Disruptive-event catalog and effect application.
//!
//! The catalog is fixed data: five events, each with 2-3 choices, each
//! choice an ordered list of typed effects. Drawing an event clones a
//! template and stamps a fresh id so every pending instance is unique.
//! Effects apply strictly in list order; a layoff mid-list therefore acts
//! on the employee set as modified by earlier effects.

use crate::{
    rng::GameRng,
    state::{Company, EventChoice, EventEffect, Notification, RandomEvent, Severity},
};

fn choice(text: &str, effects: Vec<EventEffect>) -> EventChoice {
    EventChoice {
        text: text.to_string(),
        effects,
    }
}

fn template(title: &str, description: &str, choices: Vec<EventChoice>) -> RandomEvent {
    RandomEvent {
        id: String::new(), // stamped on draw
        title: title.to_string(),
        description: description.to_string(),
        choices,
    }
}

/// The full fixed event pool.
pub fn catalog() -> Vec<RandomEvent> {
    use EventEffect::*;
    vec![
        template(
            "Market Boom",
            "The market suddenly opens up. How do you respond?",
            vec![
                choice("Invest aggressively", vec![Capital(-5_000.0), Reputation(10.0)]),
                choice("Wait and see", vec![Reputation(-5.0)]),
            ],
        ),
        template(
            "Employee Conflict",
            "Friction between employees is souring the office mood.",
            vec![
                choice(
                    "Organise a team-building retreat",
                    vec![Capital(-1_000.0), Happiness(15.0), Efficiency(0.1)],
                ),
                choice("Ignore it", vec![Happiness(-10.0), Efficiency(-0.1)]),
            ],
        ),
        template(
            "Market Crisis",
            "The industry hits a cold spell and client orders dry up.",
            vec![
                choice(
                    "Lay someone off to stop the bleeding",
                    vec![Layoff, Reputation(-20.0), Happiness(-30.0)],
                ),
                choice("Hold the line", vec![Capital(-3_000.0), Reputation(10.0)]),
            ],
        ),
        template(
            "Tech Breakthrough",
            "A new technology emerges. Invest in the upgrade?",
            vec![
                choice(
                    "Invest in the new tech",
                    vec![Capital(-8_000.0), Efficiency(0.2), Reputation(15.0)],
                ),
                choice(
                    "Stick with what works",
                    vec![Reputation(-10.0), Efficiency(-0.05)],
                ),
            ],
        ),
        template(
            "Industry Winter",
            "A sector-wide downturn puts the company under severe pressure.",
            vec![
                choice(
                    "Cut headcount",
                    vec![Layoff, Happiness(-20.0), Reputation(-15.0)],
                ),
                choice(
                    "Cut salaries 10%",
                    vec![Salary(-0.1), Happiness(-10.0), Efficiency(-0.05)],
                ),
                choice(
                    "No layoffs, absorb the loss",
                    vec![Capital(-10_000.0), Reputation(10.0), Happiness(5.0)],
                ),
            ],
        ),
    ]
}

/// Per-day probability that a new event fires (when none is pending).
pub const EVENT_CHANCE_PER_DAY: f64 = 0.15;

/// Draw one event uniformly from the catalog with a fresh instance id.
pub fn draw(rng: &mut GameRng) -> RandomEvent {
    let pool = catalog();
    let mut event = rng.pick(&pool).clone();
    event.id = uuid::Uuid::new_v4().to_string();
    event
}

/// Apply one choice's effects to the company, in order. Returns any
/// notifications raised along the way. The caller clears the active event
/// list unconditionally afterwards.
pub fn apply_choice(
    company: &mut Company,
    choice: &EventChoice,
    rng: &mut GameRng,
) -> Vec<Notification> {
    let mut raised = Vec::new();

    for effect in &choice.effects {
        match *effect {
            EventEffect::Capital(delta) => {
                company.capital += delta;
            }
            EventEffect::Efficiency(delta) => {
                for employee in &mut company.employees {
                    employee.efficiency += delta;
                    employee.clamp();
                }
            }
            EventEffect::Happiness(delta) => {
                for employee in &mut company.employees {
                    employee.happiness += delta;
                    employee.clamp();
                }
            }
            EventEffect::Reputation(delta) => {
                company.reputation = (company.reputation + delta).clamp(0.0, 100.0);
            }
            EventEffect::Layoff => {
                if company.employees.is_empty() {
                    continue;
                }
                let index = rng.below(company.employees.len() as u64) as usize;
                let fired = company.employees.remove(index);
                company.reputation = (company.reputation - 5.0).max(0.0);
                for employee in &mut company.employees {
                    employee.happiness = (employee.happiness - 10.0).max(0.0);
                }
                raised.push(Notification::new(
                    Severity::Success,
                    format!("Restructuring complete: {} let go", fired.name),
                ));
            }
            EventEffect::Salary(ratio) => {
                for employee in &mut company.employees {
                    employee.salary *= 1.0 + ratio;
                    employee.clamp();
                }
            }
        }
    }

    raised
}
