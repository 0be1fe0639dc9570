//! Candidate generation and scoring.
//!
//! Candidates ("resumes") enter the pool unrevealed: the generator fills
//! every field, but presentation must go through the redacted view until
//! the headhunting fee is paid. The curated filler lists at the bottom are
//! shared with the enrichment fallback path.

use crate::{
    economy,
    rng::GameRng,
    state::{Candidate, EducationTier, Employee, ExperienceTier, Personality},
};

/// Fixed skill catalog candidates draw from.
pub const SKILL_CATALOG: [&str; 10] = [
    "Programming",
    "Design",
    "Marketing",
    "Sales",
    "Customer Support",
    "Project Management",
    "Data Analysis",
    "Human Resources",
    "Finance",
    "Operations",
];

fn draw_experience(rng: &mut GameRng) -> ExperienceTier {
    // 50% junior, 35% mid, 15% senior
    match rng.weighted(&[0.50, 0.35, 0.15]) {
        0 => ExperienceTier::Junior,
        1 => ExperienceTier::Mid,
        _ => ExperienceTier::Senior,
    }
}

fn draw_education(rng: &mut GameRng) -> EducationTier {
    // 60% bachelor, 30% master, 10% doctorate
    match rng.weighted(&[0.60, 0.30, 0.10]) {
        0 => EducationTier::Bachelor,
        1 => EducationTier::Master,
        _ => EducationTier::Doctorate,
    }
}

/// Generate one raw (unrevealed, unenriched) candidate.
pub fn generate(rng: &mut GameRng) -> Candidate {
    let experience = draw_experience(rng);
    let education = draw_education(rng);

    let skill_count = rng.range_u64(1, 3) as usize;
    let skills: Vec<String> = rng
        .sample(&SKILL_CATALOG, skill_count)
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    let salary = economy::market_salary(experience, education) * rng.range_f64(0.9, 1.1);

    // Squaring the roll skews both draws toward the low end: most hires
    // are mediocre, stars are rare.
    let efficiency = 0.6 + rng.next_f64().powi(2) * 0.4;
    let slacking = (20.0 + rng.next_f64().powi(2) * 40.0).floor();

    Candidate {
        profile: Employee {
            id: uuid::Uuid::new_v4().to_string(),
            name: fun_name(rng),
            skills,
            experience,
            education,
            salary,
            efficiency,
            happiness: 100.0,
            slacking,
            days_employed: 0,
            personality: None,
        },
        days_in_pool: 0,
        is_revealed: false,
    }
}

pub fn generate_many(rng: &mut GameRng, count: usize) -> Vec<Candidate> {
    (0..count).map(|_| generate(rng)).collect()
}

fn education_points(education: EducationTier) -> f64 {
    match education {
        EducationTier::Bachelor => 60.0,
        EducationTier::Master => 80.0,
        EducationTier::Doctorate => 100.0,
    }
}

fn experience_points(experience: ExperienceTier) -> f64 {
    match experience {
        ExperienceTier::Junior => 60.0,
        ExperienceTier::Mid => 80.0,
        ExperienceTier::Senior => 100.0,
    }
}

/// Composite desirability score in [0, 100]: education 25%, experience
/// 25%, efficiency 20%, skill count (capped at 3) 15%, inverted slacking
/// 15%.
pub fn score(candidate: &Candidate) -> f64 {
    let profile = &candidate.profile;
    let mut score = 0.0;
    score += education_points(profile.education) * 0.25;
    score += experience_points(profile.experience) * 0.25;
    score += profile.efficiency.clamp(0.0, 1.0) * 100.0 * 0.20;
    score += (profile.skills.len().min(3) as f64 / 3.0) * 100.0 * 0.15;
    score += (100.0 - profile.slacking.clamp(0.0, 100.0)) * 0.15;
    score.round().clamp(0.0, 100.0)
}

/// Map a desirability score to a pool-refresh probability.
///
/// Currently unused: the day tick retains candidates with a flat 30% roll
/// instead of consulting the score. Kept public as the intended refinement
/// hook.
pub fn refresh_probability(score: f64) -> f64 {
    if score >= 90.0 {
        0.2
    } else if score >= 75.0 {
        0.4
    } else if score >= 60.0 {
        0.6
    } else {
        0.8
    }
}

// ── Filler generators (shared with the enrichment fallback) ────────

const SURNAMES: [&str; 10] = [
    "Lee", "Wang", "Zhang", "Liu", "Chao", "Chen", "Sun", "Zhou", "Wu", "Cheng",
];

const NICKNAMES: [&str; 10] = [
    "Happy-Go-Lucky",
    "No-Worries",
    "Desk-Napper",
    "Can't-Even",
    "Lying-Flat",
    "Lunch-First",
    "Deadline-Dodger",
    "Spreadsheet-Lord",
    "Coasting-Champ",
    "Meeting-Ghost",
];

/// A playful generated name in the "nickname + surname" house style.
pub fn fun_name(rng: &mut GameRng) -> String {
    let surname = rng.pick(&SURNAMES);
    let nickname = rng.pick(&NICKNAMES);
    format!("{nickname} {surname}")
}

const PROFESSIONAL_SKILLS: [&str; 10] = [
    "Java Development",
    "Python Programming",
    "Data Analysis",
    "UI Design",
    "Product Planning",
    "Project Management",
    "Marketing",
    "Customer Support",
    "Human Resources",
    "Financial Management",
];

const JOKE_SKILLS: [&str; 12] = [
    "Expert at looking busy",
    "Senior coasting techniques",
    "20 years of professional slacking",
    "Office politics consultant",
    "Meeting-room napping champion",
    "Communication skills MAX",
    "Slide-deck beautification master",
    "Deadline sprint king",
    "Keyboard acoustics tuner",
    "Coffee-powered survivalist",
    "Team-building hype officer",
    "Chief gossip correspondent",
];

/// 1-2 professional skills (seniors get 2) plus 2 joke skills.
pub fn fun_skills(rng: &mut GameRng, experience: ExperienceTier) -> Vec<String> {
    let professional_count = if experience == ExperienceTier::Senior { 2 } else { 1 };
    let mut skills: Vec<String> = rng
        .sample(&PROFESSIONAL_SKILLS, professional_count)
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    skills.extend(
        rng.sample(&JOKE_SKILLS, 2)
            .into_iter()
            .map(|s| s.to_string()),
    );
    skills
}

const TRAITS: [&str; 12] = [
    "Certified wage worker",
    "Top-tier slacker",
    "Grind-culture survivor",
    "Office social butterfly",
    "Workplace drama magnet",
    "Team-building avoider",
    "Caffeine dependent",
    "Keyboard warrior",
    "Daydreaming champion",
    "Professional water-cooler analyst",
    "Coasting technique advisor",
    "Office survival master",
];

const WORK_ATTITUDES: [&str; 8] = [
    "Never slacks... until nobody is watching",
    "Bad at everything except slacking, where I excel",
    "Nine to five, not a minute more",
    "Coast when possible, grind only when cornered",
    "Looks busy, is extremely idle",
    "Professionally pretending to work",
    "Works only to clock out",
    "Muddling through is a lifestyle",
];

const CAREER_PLANS: [&str; 8] = [
    "Make a hundred million first, then think about dreams",
    "Coasting to retirement counts as success",
    "Find a job with world-class slacking conditions",
    "Become someone who never works overtime",
    "Earn cat money, retire early",
    "Lying flat is a philosophy",
    "One step at a time, no further",
    "Get promoted, get a raise, achieve financial freedom",
];

/// A fully local personality block for the enrichment fallback.
pub fn fun_personality(rng: &mut GameRng) -> Personality {
    Personality {
        traits: vec![rng.pick(&TRAITS).to_string()],
        work_attitude: rng.pick(&WORK_ATTITUDES).to_string(),
        career_plan: rng.pick(&CAREER_PLANS).to_string(),
    }
}

pub fn random_trait(rng: &mut GameRng) -> String {
    rng.pick(&TRAITS).to_string()
}

pub fn random_work_attitude(rng: &mut GameRng) -> String {
    rng.pick(&WORK_ATTITUDES).to_string()
}

pub fn random_career_plan(rng: &mut GameRng) -> String {
    rng.pick(&CAREER_PLANS).to_string()
}
