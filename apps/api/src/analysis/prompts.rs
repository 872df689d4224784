// All generative prompt text and response schemas for the analysis pipeline.
// Schemas use the Gemini OpenAPI subset (upper-case type names).

use serde_json::{json, Value};

/// Requirement resolution system prompt. Replace `{target_role}` before sending.
pub const REQUIREMENTS_SYSTEM_TEMPLATE: &str = "You are an expert job market analyst. \
    Your task is to analyze the job title \"{target_role}\" and return a strict JSON list \
    of the top 10 to 15 mandatory, hard technical skills required for that role, \
    based on current industry demands. Do NOT include soft skills.";

/// Requirement resolution user turn. Replace `{target_role}` before sending.
pub const REQUIREMENTS_PROMPT_TEMPLATE: &str = "Generate the required skills for: {target_role}";

/// Roadmap system prompt: coaching tone plus the resource-quality rules.
pub const ROADMAP_SYSTEM: &str = "You are a friendly, encouraging, and knowledgeable career \
    and education coach specialized in modern tech stacks. Your goal is to provide a concise, \
    actionable, and personalized learning plan with one step per skill. \
    The suggested resources MUST adhere to the following rules: \
    1. Resources must be high-quality and completely free. \
    2. URLs must be valid and must point to official documentation, reputable learning \
    platforms, or specific project repositories (e.g., github.com/user/project). \
    3. AVOID generic search results and untrustworthy blogs.";

/// Roadmap user turn. Replace `{target_role}`, `{skills}` and `{step_count}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = "A user wants to become a {target_role}. \
    They are critically missing these key skills: {skills}. \
    Generate a structured {step_count}-step learning roadmap focusing only on these skills.";

/// `{ requiredSkills: [string] }`
pub fn required_skills_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "requiredSkills": {
                "type": "ARRAY",
                "description": "A list of 10 to 15 core, non-soft skills essential for the target job title, derived from typical job postings.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["requiredSkills"]
    })
}

/// `{ summary, steps: [{ skill, goal, resourceTitle, resourceURL }], conclusion }`
pub fn learning_roadmap_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "steps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "skill": { "type": "STRING" },
                        "goal": { "type": "STRING" },
                        "resourceTitle": { "type": "STRING" },
                        "resourceURL": { "type": "STRING" }
                    },
                    "required": ["skill", "goal", "resourceTitle", "resourceURL"]
                }
            },
            "conclusion": { "type": "STRING" }
        },
        "required": ["summary", "steps", "conclusion"]
    })
}
