// Skill-gap analysis pipeline.
// Extraction → requirement resolution → gap → roadmap, sequenced by the orchestrator.
// All generative calls go through llm_client.

pub mod extraction;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod requirements;
pub mod roadmap;
pub mod skills;

#[cfg(test)]
pub(crate) mod test_support;
