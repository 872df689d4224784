//! Roadmap Generator: turns a skill gap into a short, ordered learning plan.
//!
//! Never fails: a generation error becomes a degraded roadmap whose text explains the
//! problem, and an empty gap short-circuits to a fixed congratulatory roadmap.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::prompts::{learning_roadmap_schema, ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM};
use crate::llm_client::{call_json, GenerativeModel, StructuredPrompt};

/// At most this many missing skills are addressed by one roadmap.
pub const MAX_ROADMAP_STEPS: usize = 5;

const COMPLETED_SUMMARY: &str = "Congratulations! You possess all the core skills for this role. \
    Focus on advanced portfolio projects and real-world deployment challenges.";
const COMPLETED_CONCLUSION: &str = "Keep learning and building!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub skill: String,
    pub goal: String,
    #[serde(rename = "resourceTitle")]
    pub resource_title: String,
    #[serde(rename = "resourceURL")]
    pub resource_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub summary: String,
    pub steps: Vec<RoadmapStep>,
    pub conclusion: String,
}

impl Roadmap {
    /// Returned when the user already covers every required skill.
    pub fn completed() -> Self {
        Self {
            summary: COMPLETED_SUMMARY.to_string(),
            steps: vec![],
            conclusion: COMPLETED_CONCLUSION.to_string(),
        }
    }

    /// Returned when generation fails. Lists every missing skill, not only the focus.
    pub fn unavailable(missing: &[String], cause: &dyn Display) -> Self {
        Self {
            summary: format!("Error: Failed to generate structured roadmap. (Debug: {cause})"),
            steps: vec![],
            conclusion: format!(
                "Please check your API key and try again. You need to study: {}.",
                missing.join(", ")
            ),
        }
    }
}

/// Generates a learning roadmap for the first `MAX_ROADMAP_STEPS` missing skills.
pub async fn generate_roadmap(
    missing: &[String],
    target_role: &str,
    llm: &dyn GenerativeModel,
) -> Roadmap {
    if missing.is_empty() {
        return Roadmap::completed();
    }

    let focus = &missing[..missing.len().min(MAX_ROADMAP_STEPS)];
    let request = build_roadmap_prompt(focus, target_role);

    match call_json::<Roadmap>(llm, &request).await {
        Ok(mut roadmap) => {
            if roadmap.steps.len() > MAX_ROADMAP_STEPS {
                warn!(
                    "Roadmap returned {} steps, keeping the first {MAX_ROADMAP_STEPS}",
                    roadmap.steps.len()
                );
                roadmap.steps.truncate(MAX_ROADMAP_STEPS);
            }
            info!(
                "Generated {}-step roadmap for '{target_role}'",
                roadmap.steps.len()
            );
            roadmap
        }
        Err(e) => {
            warn!("Roadmap generation failed for '{target_role}': {e}");
            Roadmap::unavailable(missing, &e)
        }
    }
}

fn build_roadmap_prompt(focus: &[String], target_role: &str) -> StructuredPrompt {
    StructuredPrompt {
        system: ROADMAP_SYSTEM.to_string(),
        prompt: ROADMAP_PROMPT_TEMPLATE
            .replace("{target_role}", target_role)
            .replace("{skills}", &focus.join(", "))
            .replace("{step_count}", &focus.len().to_string()),
        response_schema: learning_roadmap_schema(),
    }
}
