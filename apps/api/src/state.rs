use std::sync::Arc;

use crate::analysis::extraction::SkillExtractor;
use crate::auth::JwtVerifier;
use crate::llm_client::GenerativeModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds only immutable clients; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Skill extraction service. Default: HttpSkillExtractor.
    pub extractor: Arc<dyn SkillExtractor>,
    /// Generative model for requirement resolution and roadmaps. Default: GeminiClient.
    pub llm: Arc<dyn GenerativeModel>,
    pub jwt: JwtVerifier,
}
