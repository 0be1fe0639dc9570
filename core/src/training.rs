//! Training program templates and daily advancement.
//!
//! Starting a program clones a template with a fresh id and the chosen
//! employee enrolled. Programs age one day per tick; on reaching their
//! duration they pay out their efficiency bonus to every enrolled employee
//! still on staff and are removed.

use crate::state::{Company, Notification, Severity, TrainingProgram};

fn template(
    id: &str,
    name: &str,
    skill: &str,
    duration: u64,
    cost: f64,
    efficiency_bonus: f64,
) -> TrainingProgram {
    TrainingProgram {
        id: id.to_string(),
        name: name.to_string(),
        skill: skill.to_string(),
        duration,
        cost,
        efficiency_bonus,
        employees_enrolled: Vec::new(),
        days_run: 0,
    }
}

/// The fixed program catalog offered to the player.
pub fn catalog() -> Vec<TrainingProgram> {
    vec![
        template(
            "basic_programming",
            "Basic Programming Course",
            "Programming",
            5,
            2_000.0,
            0.10,
        ),
        template(
            "advanced_design",
            "Advanced Design Course",
            "Design",
            7,
            3_000.0,
            0.15,
        ),
        template(
            "marketing_strategy",
            "Marketing Strategy Workshop",
            "Marketing",
            4,
            1_500.0,
            0.08,
        ),
        template(
            "leadership",
            "Leadership Training",
            "Project Management",
            6,
            4_000.0,
            0.20,
        ),
    ]
}

pub fn template_by_id(template_id: &str) -> Option<TrainingProgram> {
    catalog().into_iter().find(|t| t.id == template_id)
}

/// Instantiate a template for one employee with a fresh program id.
pub fn enroll(template: &TrainingProgram, employee_id: &str) -> TrainingProgram {
    TrainingProgram {
        id: uuid::Uuid::new_v4().to_string(),
        employees_enrolled: vec![employee_id.to_string()],
        days_run: 0,
        ..template.clone()
    }
}

/// Advance every running program by one day. Completed programs apply
/// their bonus (clamped by the employee invariants) and are dropped.
pub fn advance_one_day(company: &mut Company) -> Vec<Notification> {
    let mut raised = Vec::new();
    let mut remaining = Vec::with_capacity(company.training_programs.len());

    for mut program in std::mem::take(&mut company.training_programs) {
        program.days_run += 1;
        if program.days_run < program.duration {
            remaining.push(program);
            continue;
        }

        for employee in &mut company.employees {
            if program.employees_enrolled.contains(&employee.id) {
                employee.efficiency += program.efficiency_bonus;
                if !employee.skills.contains(&program.skill) {
                    employee.skills.push(program.skill.clone());
                }
                employee.clamp();
            }
        }
        raised.push(Notification::new(
            Severity::Success,
            format!("Training complete: {}", program.name),
        ));
    }

    company.training_programs = remaining;
    raised
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rng::GameRng, state::GameState};

    #[test]
    fn completion_pays_bonus_and_teaches_skill() {
        let mut state = GameState::new();
        let mut rng = GameRng::seeded(8);
        let mut employee = crate::candidates::generate(&mut rng).into_employee();
        employee.efficiency = 0.5;
        employee.skills.clear();
        let employee_id = employee.id.clone();
        state.company.employees.push(employee);

        let template = template_by_id("marketing_strategy").unwrap();
        state
            .company
            .training_programs
            .push(enroll(&template, &employee_id));

        // One day short of completion: nothing pays out.
        for _ in 0..template.duration - 1 {
            let raised = advance_one_day(&mut state.company);
            assert!(raised.is_empty());
        }
        assert_eq!(state.company.training_programs.len(), 1);
        assert_eq!(state.company.employees[0].efficiency, 0.5);

        let raised = advance_one_day(&mut state.company);
        assert_eq!(raised.len(), 1);
        assert!(state.company.training_programs.is_empty());
        let trained = &state.company.employees[0];
        assert!((trained.efficiency - 0.58).abs() < 1e-9);
        assert!(trained.skills.contains(&"Marketing".to_string()));
    }

    #[test]
    fn bonus_respects_efficiency_ceiling() {
        let mut state = GameState::new();
        let mut rng = GameRng::seeded(8);
        let mut employee = crate::candidates::generate(&mut rng).into_employee();
        employee.efficiency = 0.95;
        let employee_id = employee.id.clone();
        state.company.employees.push(employee);

        let template = template_by_id("leadership").unwrap();
        state
            .company
            .training_programs
            .push(enroll(&template, &employee_id));
        for _ in 0..template.duration {
            advance_one_day(&mut state.company);
        }
        assert_eq!(state.company.employees[0].efficiency, 1.0);
    }

    #[test]
    fn departed_enrollees_are_skipped() {
        let mut state = GameState::new();
        let template = template_by_id("basic_programming").unwrap();
        state
            .company
            .training_programs
            .push(enroll(&template, "gone"));
        for _ in 0..template.duration {
            advance_one_day(&mut state.company);
        }
        assert!(state.company.training_programs.is_empty());
    }
}
