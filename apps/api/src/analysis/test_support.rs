//! In-process doubles for the pipeline's external collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::analysis::extraction::{ExtractionError, ExtractionInput, SkillExtractor};
use crate::llm_client::{GenerativeModel, LlmError, StructuredPrompt};

/// What a stubbed collaborator answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
}

impl Reply {
    pub fn json(value: serde_json::Value) -> Self {
        Reply::Text(value.to_string())
    }
}

/// Answers requirement-resolution and roadmap requests separately, telling them apart
/// by the response schema, and records every prompt it receives.
pub struct StubModel {
    requirements: Reply,
    roadmap: Reply,
    pub requirement_calls: AtomicUsize,
    pub roadmap_calls: AtomicUsize,
    pub prompts: Mutex<Vec<StructuredPrompt>>,
}

impl StubModel {
    pub fn new(requirements: Reply, roadmap: Reply) -> Self {
        Self {
            requirements,
            roadmap,
            requirement_calls: AtomicUsize::new(0),
            roadmap_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn requirement_calls(&self) -> usize {
        self.requirement_calls.load(Ordering::SeqCst)
    }

    pub fn roadmap_calls(&self) -> usize {
        self.roadmap_calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<StructuredPrompt> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, request: &StructuredPrompt) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(request.clone());

        let asks_for_requirements = request.response_schema["properties"]
            .get("requiredSkills")
            .is_some();
        let reply = if asks_for_requirements {
            self.requirement_calls.fetch_add(1, Ordering::SeqCst);
            &self.requirements
        } else {
            self.roadmap_calls.fetch_add(1, Ordering::SeqCst);
            &self.roadmap
        };

        match reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(message) => Err(LlmError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}

pub struct StubExtractor {
    reply: Result<Vec<String>, String>,
    pub calls: AtomicUsize,
    pub inputs: Mutex<Vec<ExtractionInput>>,
}

impl StubExtractor {
    pub fn returning(skills: &[&str]) -> Self {
        Self {
            reply: Ok(skills.iter().map(|s| s.to_string()).collect()),
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SkillExtractor for StubExtractor {
    async fn extract(
        &self,
        input: &ExtractionInput,
        _target_role: &str,
    ) -> Result<Vec<String>, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(input.clone());
        self.reply.clone().map_err(|message| ExtractionError::Service {
            status: 503,
            message,
        })
    }
}
