//! Analysis Orchestrator: runs the skill-gap pipeline for one authenticated request.
//!
//! Flow: validate → extract user skills → resolve required skills → diff → roadmap.
//!
//! Validation completes before any external call. Extraction and requirement failures
//! abort the request; roadmap failures are absorbed into a degraded roadmap. Every
//! external call is attempted exactly once.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::extraction::{ExtractionInput, SkillExtractor};
use crate::analysis::requirements::resolve_required_skills;
use crate::analysis::roadmap::{generate_roadmap, Roadmap};
use crate::analysis::skills::diff;
use crate::errors::AppError;
use crate::llm_client::GenerativeModel;

/// Inbound analysis request. Either `resumeText` or `fileBuffer` + `filename` is expected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Free-text job title. The web client sends it as `targetJobTitle`.
    #[serde(default, alias = "targetJobTitle")]
    pub target_role: Option<String>,
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Base64-encoded document.
    #[serde(default)]
    pub file_buffer: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// The complete outcome of one analysis. Built once, never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub target_role: String,
    pub required_skills: Vec<String>,
    pub user_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub learning_roadmap: Roadmap,
    pub user_id: String,
}

impl AnalysisRequest {
    /// Checks the request and returns the trimmed target role and the content to analyze.
    ///
    /// A document takes precedence over inline text. Blank text and a buffer without a
    /// filename count as absent.
    pub fn validate(self) -> Result<(String, ExtractionInput), AppError> {
        let target_role = self
            .target_role
            .as_deref()
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .ok_or_else(|| {
                AppError::InvalidRequest("Target job title is missing in the request.".to_string())
            })?
            .to_string();

        let document = match (self.file_buffer, self.filename) {
            (Some(buffer), Some(filename))
                if !buffer.trim().is_empty() && !filename.trim().is_empty() =>
            {
                Some((buffer, filename))
            }
            _ => None,
        };

        let input = if let Some((buffer, filename)) = document {
            let bytes = STANDARD.decode(buffer.trim()).map_err(|e| {
                AppError::InvalidRequest(format!("fileBuffer is not valid base64: {e}"))
            })?;
            ExtractionInput::Document { bytes, filename }
        } else if let Some(text) = self.resume_text.filter(|t| !t.trim().is_empty()) {
            ExtractionInput::Text(text)
        } else {
            return Err(AppError::InvalidRequest(
                "Request body is empty or missing required fields (text or file).".to_string(),
            ));
        };

        Ok((target_role, input))
    }
}

/// Runs the full analysis pipeline for `user_id`.
pub async fn analyze(
    request: AnalysisRequest,
    user_id: &str,
    extractor: &dyn SkillExtractor,
    llm: &dyn GenerativeModel,
) -> Result<AnalysisResult, AppError> {
    // Steps 1-2: Validate before touching any dependency
    let (target_role, input) = request.validate()?;

    // Step 3: Extract user skills
    let user_skills = extractor
        .extract(&input, &target_role)
        .await
        .map_err(|e| AppError::ExtractionUnavailable(e.to_string()))?;
    info!("Extracted {} user skills", user_skills.len());

    // Step 4: Resolve required skills (falls back internally)
    let required_skills = resolve_required_skills(&target_role, llm).await?;

    // Step 5: Gap
    let missing_skills = diff(&required_skills, &user_skills);
    info!(
        "Skill gap for '{target_role}': {}/{} required skills missing",
        missing_skills.len(),
        required_skills.len()
    );

    // Step 6: Roadmap (never fails)
    let learning_roadmap = generate_roadmap(&missing_skills, &target_role, llm).await;

    Ok(AnalysisResult {
        target_role,
        required_skills,
        user_skills,
        missing_skills,
        learning_roadmap,
        user_id: user_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::requirements::fallback_skills;
    use crate::analysis::test_support::{Reply, StubExtractor, StubModel};
    use serde_json::json;

    fn text_request(role: &str, text: &str) -> AnalysisRequest {
        AnalysisRequest {
            target_role: Some(role.to_string()),
            resume_text: Some(text.to_string()),
            ..Default::default()
        }
    }

    fn requirements(skills: &[&str]) -> Reply {
        Reply::json(json!({ "requiredSkills": skills }))
    }

    fn roadmap_reply() -> Reply {
        Reply::json(json!({
            "summary": "Close the gap in a month.",
            "steps": [{
                "skill": "Docker",
                "goal": "Containerize a small service",
                "resourceTitle": "Docker Get Started",
                "resourceURL": "https://docs.docker.com/get-started/"
            }],
            "conclusion": "Ship it."
        }))
    }

    #[tokio::test]
    async fn test_full_pipeline_assembles_result() {
        let extractor = StubExtractor::returning(&["react", " NODE "]);
        let model = StubModel::new(requirements(&["React", "Node", "Docker"]), roadmap_reply());

        let result = analyze(
            text_request("  Full Stack Developer ", "React and Node"),
            "user-42",
            &extractor,
            &model,
        )
        .await
        .unwrap();

        assert_eq!(result.target_role, "Full Stack Developer");
        assert_eq!(result.required_skills, vec!["React", "Node", "Docker"]);
        assert_eq!(result.user_skills, vec!["react", " NODE "]);
        assert_eq!(result.missing_skills, vec!["Docker"]);
        assert_eq!(result.learning_roadmap.steps.len(), 1);
        assert_eq!(result.user_id, "user-42");
        assert_eq!(extractor.calls(), 1);
        assert_eq!(model.requirement_calls(), 1);
        assert_eq!(model.roadmap_calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_target_role_is_rejected_before_any_call() {
        let extractor = StubExtractor::returning(&["Rust"]);
        let model = StubModel::new(requirements(&["Rust"]), roadmap_reply());

        let result = analyze(text_request("   ", "Rust"), "u", &extractor, &model).await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert_eq!(extractor.calls(), 0);
        assert_eq!(model.requirement_calls(), 0);
        assert_eq!(model.roadmap_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_content_is_rejected_before_any_call() {
        let extractor = StubExtractor::returning(&["Rust"]);
        let model = StubModel::new(requirements(&["Rust"]), roadmap_reply());
        let request = AnalysisRequest {
            target_role: Some("Engineer".to_string()),
            resume_text: Some("  ".to_string()),
            file_buffer: Some("JVBERi0xLjc=".to_string()),
            filename: None,
        };

        let result = analyze(request, "u", &extractor, &model).await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert_eq!(extractor.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_base64_is_rejected_before_any_call() {
        let extractor = StubExtractor::returning(&[]);
        let model = StubModel::new(requirements(&["Rust"]), roadmap_reply());
        let request = AnalysisRequest {
            target_role: Some("Engineer".to_string()),
            file_buffer: Some("not base64!!".to_string()),
            filename: Some("cv.pdf".to_string()),
            ..Default::default()
        };

        let result = analyze(request, "u", &extractor, &model).await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert_eq!(extractor.calls(), 0);
    }

    #[tokio::test]
    async fn test_extraction_failure_aborts_before_resolution() {
        let extractor = StubExtractor::failing("connection refused");
        let model = StubModel::new(requirements(&["Rust"]), roadmap_reply());

        let result = analyze(text_request("Engineer", "Rust"), "u", &extractor, &model).await;

        match result {
            Err(AppError::ExtractionUnavailable(cause)) => {
                assert!(cause.contains("connection refused"))
            }
            other => panic!("expected ExtractionUnavailable, got {other:?}"),
        }
        assert_eq!(model.requirement_calls(), 0);
        assert_eq!(model.roadmap_calls(), 0);
    }

    #[tokio::test]
    async fn test_resolution_failure_uses_fallback_list() {
        let extractor = StubExtractor::returning(&["JavaScript", "git"]);
        let model = StubModel::new(Reply::Fail("503 unavailable".to_string()), roadmap_reply());

        let result = analyze(text_request("Web Developer", "JS"), "u", &extractor, &model)
            .await
            .unwrap();

        assert_eq!(result.required_skills, fallback_skills());
        assert!(!result.missing_skills.contains(&"JavaScript".to_string()));
        assert!(!result.missing_skills.contains(&"Git".to_string()));
        assert_eq!(result.missing_skills.len(), 8);
    }

    #[tokio::test]
    async fn test_empty_requirements_abort_without_roadmap() {
        let extractor = StubExtractor::returning(&["Rust"]);
        let model = StubModel::new(requirements(&[]), roadmap_reply());

        let result = analyze(text_request("Engineer", "Rust"), "u", &extractor, &model).await;

        assert!(matches!(result, Err(AppError::RequirementsUnavailable(_))));
        assert_eq!(model.roadmap_calls(), 0);
    }

    #[tokio::test]
    async fn test_roadmap_failure_still_succeeds() {
        let extractor = StubExtractor::returning(&["Python"]);
        let model = StubModel::new(
            requirements(&["Python", "SQL"]),
            Reply::Fail("invalid api key".to_string()),
        );

        let result = analyze(text_request("Data Analyst", "Python"), "u", &extractor, &model)
            .await
            .unwrap();

        assert_eq!(result.missing_skills, vec!["SQL"]);
        assert!(result.learning_roadmap.steps.is_empty());
        assert!(result.learning_roadmap.summary.starts_with("Error:"));
        assert!(result.learning_roadmap.conclusion.contains("SQL"));
    }

    #[tokio::test]
    async fn test_no_gap_skips_roadmap_call() {
        let extractor = StubExtractor::returning(&["python", "SQL"]);
        let model = StubModel::new(requirements(&["Python", "sql"]), roadmap_reply());

        let result = analyze(text_request("Data Analyst", "Python SQL"), "u", &extractor, &model)
            .await
            .unwrap();

        assert!(result.missing_skills.is_empty());
        assert_eq!(result.learning_roadmap, Roadmap::completed());
        assert_eq!(model.roadmap_calls(), 0);
    }

    #[tokio::test]
    async fn test_document_takes_precedence_over_text() {
        let extractor = StubExtractor::returning(&["SQL"]);
        let model = StubModel::new(requirements(&["SQL"]), roadmap_reply());
        let request = AnalysisRequest {
            target_role: Some("Analyst".to_string()),
            resume_text: Some("pasted text".to_string()),
            file_buffer: Some("JVBERi0xLjc=".to_string()),
            filename: Some("cv.pdf".to_string()),
        };

        analyze(request, "u", &extractor, &model).await.unwrap();

        let inputs = extractor.inputs.lock().unwrap();
        assert_eq!(
            inputs[0],
            ExtractionInput::Document {
                bytes: b"%PDF-1.7".to_vec(),
                filename: "cv.pdf".to_string(),
            }
        );
    }

    #[test]
    fn test_request_accepts_target_job_title_alias() {
        let request: AnalysisRequest = serde_json::from_value(json!({
            "targetJobTitle": "SRE",
            "resumeText": "Linux, Bash"
        }))
        .unwrap();
        assert_eq!(request.target_role.as_deref(), Some("SRE"));
        assert_eq!(request.resume_text.as_deref(), Some("Linux, Bash"));
    }

    #[test]
    fn test_result_serializes_with_camel_case_fields() {
        let result = AnalysisResult {
            target_role: "SRE".to_string(),
            required_skills: vec!["Linux".to_string()],
            user_skills: vec![],
            missing_skills: vec!["Linux".to_string()],
            learning_roadmap: Roadmap::completed(),
            user_id: "abc".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        for field in [
            "targetRole",
            "requiredSkills",
            "userSkills",
            "missingSkills",
            "learningRoadmap",
            "userId",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
    }
}
