//! Requirement Resolver: determines which hard skills a free-text job title demands.
//!
//! The generative call is the least reliable dependency in the pipeline, so any failure
//! there is recovered with a fixed baseline list instead of failing the request.

use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::prompts::{
    required_skills_schema, REQUIREMENTS_PROMPT_TEMPLATE, REQUIREMENTS_SYSTEM_TEMPLATE,
};
use crate::errors::AppError;
use crate::llm_client::{call_json, GenerativeModel, StructuredPrompt};

/// Baseline software role used when dynamic resolution fails.
pub const FALLBACK_SKILLS: [&str; 10] = [
    "JavaScript",
    "React",
    "Node.js",
    "Express",
    "MongoDB",
    "Git",
    "REST API",
    "HTML",
    "CSS",
    "SQL",
];

/// Size range the prompt asks for. Not enforced.
const EXPECTED_SKILL_COUNT: std::ops::RangeInclusive<usize> = 10..=15;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequiredSkillsResponse {
    required_skills: Vec<String>,
}

/// Resolves the required skills for `target_role`.
///
/// Transport, API, and schema failures fall back to `FALLBACK_SKILLS`. A well-formed
/// response that contains no usable skills is fatal for the request.
pub async fn resolve_required_skills(
    target_role: &str,
    llm: &dyn GenerativeModel,
) -> Result<Vec<String>, AppError> {
    let request = build_requirements_prompt(target_role);

    let skills = match call_json::<RequiredSkillsResponse>(llm, &request).await {
        Ok(response) => clean_skills(response.required_skills),
        Err(e) => {
            warn!("Dynamic skill retrieval failed for '{target_role}': {e}");
            warn!("Falling back to generic baseline skills");
            fallback_skills()
        }
    };

    if skills.is_empty() {
        return Err(AppError::RequirementsUnavailable(format!(
            "no required skills resolved for '{target_role}'"
        )));
    }

    info!("Resolved {} for '{target_role}'", describe_count(skills.len()));
    Ok(skills)
}

pub fn fallback_skills() -> Vec<String> {
    FALLBACK_SKILLS.iter().map(|s| s.to_string()).collect()
}

/// Count phrase for the resolution log line, flagging sizes outside the requested range.
fn describe_count(count: usize) -> String {
    if EXPECTED_SKILL_COUNT.contains(&count) {
        format!("{count} required skills")
    } else {
        format!(
            "{count} required skills (expected {}-{})",
            EXPECTED_SKILL_COUNT.start(),
            EXPECTED_SKILL_COUNT.end()
        )
    }
}

fn build_requirements_prompt(target_role: &str) -> StructuredPrompt {
    StructuredPrompt {
        system: REQUIREMENTS_SYSTEM_TEMPLATE.replace("{target_role}", target_role),
        prompt: REQUIREMENTS_PROMPT_TEMPLATE.replace("{target_role}", target_role),
        response_schema: required_skills_schema(),
    }
}

/// Trims entries and drops blank ones. Order and near-duplicates are kept.
fn clean_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
