//! Content enrichment — fleshing out a candidate's narrative fields from
//! an external text-generation service.
//!
//! The network call runs on a worker thread, never on the store thread.
//! Results travel back exclusively as dispatched actions; the worker holds
//! a cloned candidate, not a snapshot reference, because the pool may have
//! advanced by the time the call resolves. The store's merge step
//! re-resolves the candidate by id and drops the result silently if the
//! candidate is gone.
//!
//! Failure is always recoverable: after the retry budget is spent the
//! content is produced by the local filler generators instead.

use crate::{
    actions::{Action, ResumeContent},
    candidates,
    rng::GameRng,
    state::{Candidate, Company, EducationTier, ExperienceTier, Notification, Personality, Severity},
};
use serde::Deserialize;
use std::{
    sync::{mpsc::Sender, Arc},
    thread,
    time::Duration,
};

/// Retry budget for one enrichment request.
pub const MAX_RETRIES: u32 = 3;
pub const INITIAL_DELAY: Duration = Duration::from_secs(1);
pub const MAX_DELAY: Duration = Duration::from_secs(5);

/// The outbound seam to the text-generation backend. Kept object-safe so
/// tests and the runner can substitute canned or fully local generators.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;

    /// Backends that know they are unreachable return false so callers
    /// can skip the retry window and go straight to local generation.
    fn is_available(&self) -> bool {
        true
    }
}

/// Production backend: an Ollama-style `/api/generate` endpoint.
pub struct OllamaClient {
    agent: ureq::Agent,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(30))
                .build(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl TextGenerator for OllamaClient {
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let body: GenerateResponse = self
            .agent
            .post(&url)
            .send_json(serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
            }))?
            .into_json()?;
        Ok(body.response)
    }
}

/// A backend that always fails. Lets the runner exercise the full local
/// fallback path without a service running.
pub struct OfflineGenerator;

impl TextGenerator for OfflineGenerator {
    fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        anyhow::bail!("no text-generation service configured")
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Run `operation` with exponential backoff: delays 1s, 2s, 4s, capped at
/// 5s, then surface the final error.
pub fn with_backoff<T>(
    mut operation: impl FnMut() -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let mut attempt = 0u32;
    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(err) if attempt < MAX_RETRIES => {
                let delay = INITIAL_DELAY
                    .checked_mul(1 << attempt)
                    .unwrap_or(MAX_DELAY)
                    .min(MAX_DELAY);
                log::warn!(
                    "enrichment attempt {} failed, retrying in {:?}: {err:#}",
                    attempt + 1,
                    delay
                );
                thread::sleep(delay);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

// ── Response parsing ───────────────────────────────────────────────

/// What the service is asked to embed in its free-text reply. Every field
/// is optional; the blend step fills holes locally.
#[derive(Debug, Default, Deserialize)]
pub struct ServicePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub personality: Option<ServicePersonality>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServicePersonality {
    #[serde(default)]
    pub traits: Option<Vec<String>>,
    #[serde(default, alias = "workAttitude")]
    pub work_attitude: Option<String>,
    #[serde(default, alias = "careerPlan")]
    pub career_plan: Option<String>,
}

/// Extract the JSON object embedded in a free-text reply. `None` when no
/// well-formed object is present; callers treat that as a recoverable
/// failure, never a crash.
pub fn extract_payload(text: &str) -> Option<ServicePayload> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

fn build_prompt(experience: ExperienceTier, education: EducationTier) -> String {
    format!(
        "You are a playful HR assistant. Invent a quirky job applicant.\n\
         Experience: {}\nEducation: {}\n\
         Reply with exactly one JSON object:\n\
         {{\"name\": \"...\", \"skills\": [\"...\"], \"personality\": \
         {{\"traits\": [\"...\"], \"work_attitude\": \"...\", \"career_plan\": \"...\"}}}}",
        experience.label(),
        education.label(),
    )
}

// ── Blending ───────────────────────────────────────────────────────

/// Combine the service payload with locally generated filler.
///
/// Rules: an existing candidate name always wins; otherwise the service
/// name is kept half the time. The first service skill survives and is
/// padded with local filler; the first service trait survives and one
/// local trait is appended; work attitude and career plan each flip a coin
/// between service and local.
pub fn blend(
    payload: ServicePayload,
    existing_name: Option<&str>,
    experience: ExperienceTier,
    rng: &mut GameRng,
) -> ResumeContent {
    let name = match existing_name {
        Some(name) => name.to_string(),
        None => match payload.name {
            Some(service_name) if rng.chance(0.5) => service_name,
            _ => candidates::fun_name(rng),
        },
    };

    let skills = match payload.skills {
        Some(service_skills) if !service_skills.is_empty() => {
            let mut skills = vec![service_skills[0].clone()];
            skills.extend(
                candidates::fun_skills(rng, experience)
                    .into_iter()
                    .take(2),
            );
            skills
        }
        _ => candidates::fun_skills(rng, experience),
    };

    let service_personality = payload.personality.unwrap_or_default();
    let traits = match service_personality.traits {
        Some(service_traits) if !service_traits.is_empty() => {
            vec![service_traits[0].clone(), candidates::random_trait(rng)]
        }
        _ => vec![candidates::random_trait(rng)],
    };
    let work_attitude = match service_personality.work_attitude {
        Some(attitude) if rng.chance(0.5) => attitude,
        _ => candidates::random_work_attitude(rng),
    };
    let career_plan = match service_personality.career_plan {
        Some(plan) if rng.chance(0.5) => plan,
        _ => candidates::random_career_plan(rng),
    };

    ResumeContent {
        name,
        skills,
        personality: Personality {
            traits,
            work_attitude,
            career_plan,
        },
    }
}

/// Fully local content, used when the service fails or is absent.
pub fn local_content(
    existing_name: Option<&str>,
    experience: ExperienceTier,
    rng: &mut GameRng,
) -> ResumeContent {
    ResumeContent {
        name: existing_name
            .map(str::to_string)
            .unwrap_or_else(|| candidates::fun_name(rng)),
        skills: candidates::fun_skills(rng, experience),
        personality: candidates::fun_personality(rng),
    }
}

/// Result of one enrichment attempt. `degraded` is set when a configured
/// service failed (network or parse) and local fallback content was used;
/// callers surface that to the player as an informational notification.
pub struct Enriched {
    pub content: ResumeContent,
    pub degraded: bool,
}

/// Produce content for one candidate, service-first with local fallback.
/// Blocking; call from a worker thread.
pub fn enrich_candidate(
    generator: &dyn TextGenerator,
    candidate: &Candidate,
    rng: &mut GameRng,
) -> Enriched {
    let profile = &candidate.profile;
    let existing_name = (!profile.name.is_empty()).then_some(profile.name.as_str());

    if !generator.is_available() {
        // No service configured at all: local content is the normal
        // path, not a degradation.
        return Enriched {
            content: local_content(existing_name, profile.experience, rng),
            degraded: false,
        };
    }

    let prompt = build_prompt(profile.experience, profile.education);
    match with_backoff(|| generator.generate(&prompt)) {
        Ok(text) => match extract_payload(&text) {
            Some(payload) => Enriched {
                content: blend(payload, existing_name, profile.experience, rng),
                degraded: false,
            },
            None => {
                log::info!(
                    "enrichment reply for {} had no parsable payload, using local content",
                    candidate.id()
                );
                Enriched {
                    content: local_content(existing_name, profile.experience, rng),
                    degraded: true,
                }
            }
        },
        Err(err) => {
            log::info!(
                "enrichment for {} fell back to local content: {err:#}",
                candidate.id()
            );
            Enriched {
                content: local_content(existing_name, profile.experience, rng),
                degraded: true,
            }
        }
    }
}

// ── Worker-thread entry points ─────────────────────────────────────

/// Enrich one candidate off-thread and dispatch the result back.
///
/// Idempotence guard: a candidate already carrying narrative fields is
/// reported as-is without issuing a request.
pub fn spawn_candidate_enrichment(
    generator: Arc<dyn TextGenerator>,
    candidate: Candidate,
    tx: Sender<Action>,
) {
    thread::spawn(move || {
        let content = match &candidate.profile.personality {
            Some(personality) => ResumeContent {
                name: candidate.profile.name.clone(),
                skills: candidate.profile.skills.clone(),
                personality: personality.clone(),
            },
            None => {
                let mut rng = GameRng::from_entropy();
                let enriched = enrich_candidate(generator.as_ref(), &candidate, &mut rng);
                if enriched.degraded {
                    let _ = tx.send(Action::AddNotification {
                        notification: Notification::new(
                            Severity::Info,
                            "Content service unreachable, resume written locally",
                        ),
                    });
                }
                enriched.content
            }
        };
        // The store may have dropped the candidate meanwhile; the merge
        // step no-ops in that case.
        let _ = tx.send(Action::UpdateResumeContent {
            candidate_id: candidate.id().to_string(),
            content,
        });
    });
}

/// Finalise a day tick off-thread: enrich every new candidate lacking
/// narrative fields, then hand the finished pool back to the store.
pub fn spawn_day_finalisation(
    generator: Arc<dyn TextGenerator>,
    company: Company,
    mut candidate_pool: Vec<Candidate>,
    tx: Sender<Action>,
) {
    thread::spawn(move || {
        let mut rng = GameRng::from_entropy();
        let mut any_degraded = false;
        for candidate in &mut candidate_pool {
            if candidate.profile.personality.is_some() {
                continue;
            }
            let enriched = enrich_candidate(generator.as_ref(), candidate, &mut rng);
            any_degraded |= enriched.degraded;
            candidate.profile.name = enriched.content.name;
            candidate.profile.skills = enriched.content.skills;
            candidate.profile.personality = Some(enriched.content.personality);
        }
        // One note per batch, not one per candidate.
        if any_degraded {
            let _ = tx.send(Action::AddNotification {
                notification: Notification::new(
                    Severity::Info,
                    "Content service unreachable, resumes written locally",
                ),
            });
        }
        let _ = tx.send(Action::DayAdvanceComplete {
            company,
            candidate_pool,
        });
    });
}
