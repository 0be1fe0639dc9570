//! Economic formula library — pure functions over a company snapshot.
//!
//! Every function here is deterministic and side-effect free; the day tick
//! in `store` is the only caller that commits the results.

use crate::state::{Company, EducationTier, Employee, ExperienceTier};

/// Flat income earned even with an empty office.
pub const BASE_INCOME: f64 = 800.0;

/// Income never drops below this share of the base.
pub const INCOME_FLOOR_RATIO: f64 = 0.3;

/// Daily expenses: salaries amortised over a 30-day month plus training
/// program costs amortised over their duration. Floored at zero.
pub fn daily_expenses(company: &Company) -> f64 {
    let salaries: f64 = company
        .employees
        .iter()
        .map(|e| e.salary.max(0.0) / 30.0)
        .sum();
    let training: f64 = company
        .training_programs
        .iter()
        .map(|p| p.cost.max(0.0) / p.duration.max(1) as f64)
        .sum();
    (salaries + training).max(0.0)
}

/// One employee's daily contribution before the reputation multiplier.
pub fn employee_contribution(employee: &Employee) -> f64 {
    let salary = employee.salary.max(0.0);
    let efficiency = employee.efficiency.clamp(0.0, 1.0);
    let happiness = employee.happiness.clamp(0.0, 100.0);
    let slacking = employee.slacking.clamp(0.0, 100.0);

    let happiness_multiplier = 0.3 + happiness / 143.0;
    let slacking_multiplier = 1.0 - slacking / 143.0;

    let contribution = salary * 0.08 * efficiency
        * happiness_multiplier
        * slacking_multiplier
        * employee.experience.income_multiplier();
    contribution.max(0.0)
}

/// Daily income: base plus the reputation-scaled employee sum, floored at
/// 30% of the base.
pub fn daily_income(company: &Company) -> f64 {
    let employee_sum: f64 = company.employees.iter().map(employee_contribution).sum();

    let reputation = company.reputation.clamp(0.0, 100.0);
    let reputation_multiplier = 0.3 + reputation / 125.0;

    let income = BASE_INCOME + employee_sum * reputation_multiplier;
    income.max(BASE_INCOME * INCOME_FLOOR_RATIO)
}

/// The market rate a candidate of this profile expects. Salaries below
/// 90% of this push the slacking drift upward.
pub fn market_salary(experience: ExperienceTier, education: EducationTier) -> f64 {
    experience.base_salary() * education.salary_multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EducationTier, ExperienceTier, GameState};

    fn senior(salary: f64, efficiency: f64, happiness: f64, slacking: f64) -> Employee {
        Employee {
            id: "e1".into(),
            name: "Ada".into(),
            skills: vec!["programming".into()],
            experience: ExperienceTier::Senior,
            education: EducationTier::Bachelor,
            salary,
            efficiency,
            happiness,
            slacking,
            days_employed: 0,
            personality: None,
        }
    }

    #[test]
    fn empty_company_earns_base_income() {
        let state = GameState::new();
        // reputation 50 -> employee sum is zero, only the base remains
        assert_eq!(daily_income(&state.company), BASE_INCOME);
        assert_eq!(daily_expenses(&state.company), 0.0);
    }

    #[test]
    fn senior_contribution_matches_formula() {
        let employee = senior(30_000.0, 1.0, 100.0, 0.0);
        let expected = 30_000.0 * 0.08 * 1.0 * (0.3 + 100.0 / 143.0) * 1.0 * 1.4;
        assert!((employee_contribution(&employee) - expected).abs() < 1e-9);
    }

    #[test]
    fn reputation_scales_the_employee_sum_only() {
        let mut state = GameState::new();
        state.company.reputation = 50.0;
        state.company.employees.push(senior(30_000.0, 1.0, 100.0, 0.0));

        let sum = employee_contribution(&state.company.employees[0]);
        let expected = BASE_INCOME + sum * (0.3 + 50.0 / 125.0);
        assert!((daily_income(&state.company) - expected).abs() < 1e-9);
    }

    #[test]
    fn expenses_amortise_salary_over_thirty_days() {
        let mut state = GameState::new();
        state.company.employees.push(senior(30_000.0, 1.0, 100.0, 0.0));
        assert!((daily_expenses(&state.company) - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn market_salary_combines_tier_and_education() {
        let rate = market_salary(ExperienceTier::Mid, EducationTier::Doctorate);
        assert!((rate - 15_000.0 * 1.8).abs() < 1e-9);
    }
}
