//! Orchestrator — executes pipeline units strictly sequentially, feeding
//! each unit's declared dependency outputs into its prompt context.
//!
//! Invariant: a unit never executes before every unit in its dependency
//! set has produced output. Outputs are immutable once recorded for a run.
//!
//! A failed web search is not a unit failure: the research unit's own task
//! text tells it to fall back to generic domain knowledge, so the
//! orchestrator injects a fallback note and keeps going.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use tracing::{info, warn};

use crate::config::ModelCredentials;
use crate::errors::AppError;
use crate::llm_client::{ChatModel, LlmClient, ModelEndpoint};
use crate::pipeline::units::{EndpointKind, ToolKind, UnitId, UnitSpec};
use crate::search::{SearchTool, SerperClient};

/// Note injected into the prompt when a requested search cannot be served.
const SEARCH_FALLBACK_NOTE: &str = "\n\nNOTE: Web search is unavailable. \
    Rely on the standard requirements for the role and give your final answer.";

/// The two text blobs a successful run produces.
#[derive(Debug, Clone)]
pub struct RunOutputs {
    /// Raw output of the strategy unit — the tailored resume.
    pub resume: String,
    /// Raw output of the interview-prep unit.
    pub interview_prep: String,
}

/// Executes a declared pipeline against the two model endpoints.
pub struct Orchestrator {
    research_model: Arc<dyn ChatModel>,
    logic_model: Arc<dyn ChatModel>,
    search: Option<Arc<dyn SearchTool>>,
}

impl Orchestrator {
    /// Wires real clients from run credentials. The search tool is optional;
    /// without it the research unit runs on general knowledge.
    pub fn from_credentials(creds: &ModelCredentials, serper_api_key: Option<String>) -> Self {
        let research_model = LlmClient::new(ModelEndpoint::gemini(creds.gemini_api_key.clone()));
        let logic_model = LlmClient::new(ModelEndpoint::groq(creds.groq_api_key.clone()));
        Self {
            research_model: Arc::new(research_model),
            logic_model: Arc::new(logic_model),
            search: serper_api_key.map(|key| Arc::new(SerperClient::new(key)) as Arc<dyn SearchTool>),
        }
    }

    /// Test seam: orchestrator over scripted models.
    pub fn new(
        research_model: Arc<dyn ChatModel>,
        logic_model: Arc<dyn ChatModel>,
        search: Option<Arc<dyn SearchTool>>,
    ) -> Self {
        Self {
            research_model,
            logic_model,
            search,
        }
    }

    /// Runs every unit in declared order and returns the two result texts.
    pub async fn run(&self, units: &[UnitSpec]) -> Result<RunOutputs, AppError> {
        let mut outputs: HashMap<UnitId, String> = HashMap::new();

        for unit in units {
            let prompt = assemble_prompt(unit, &outputs)?;
            info!("Running unit {} ({})", unit.id.as_str(), unit.role);

            let output = self.execute_unit(unit, prompt).await?;
            info!(
                "Unit {} produced {} chars",
                unit.id.as_str(),
                output.len()
            );
            outputs.insert(unit.id, output);
        }

        let resume = outputs
            .remove(&UnitId::Strategy)
            .ok_or_else(|| AppError::Internal(anyhow!("Pipeline produced no strategy output")))?;
        let interview_prep = outputs.remove(&UnitId::InterviewPrep).ok_or_else(|| {
            AppError::Internal(anyhow!("Pipeline produced no interview-prep output"))
        })?;

        Ok(RunOutputs {
            resume,
            interview_prep,
        })
    }

    /// Executes one unit with its bounded iteration cap. Iterations before
    /// the last may request a search; the last is always a final answer.
    async fn execute_unit(&self, unit: &UnitSpec, mut prompt: String) -> Result<String, AppError> {
        let model = self.model_for(unit.endpoint);
        let system = unit.system_prompt();

        for iteration in 1..=unit.max_iter {
            let response = model
                .complete(&system, &prompt)
                .await
                .map_err(|e| AppError::Llm(format!("Unit {} failed: {e}", unit.id.as_str())))?;

            if iteration == unit.max_iter {
                return Ok(response);
            }

            let query = match parse_search_request(&response) {
                Some(q) if unit.has_tool(ToolKind::WebSearch) => q,
                _ => return Ok(response),
            };

            match &self.search {
                Some(tool) => match tool.search(&query).await {
                    Ok(results) => {
                        prompt.push_str(&format!(
                            "\n\nSEARCH RESULTS for \"{query}\":\n{results}\n\nGive your final answer now."
                        ));
                    }
                    Err(e) => {
                        warn!("Search failed for unit {}: {e} — falling back", unit.id.as_str());
                        prompt.push_str(SEARCH_FALLBACK_NOTE);
                    }
                },
                None => {
                    warn!("Unit {} requested a search but no tool is configured", unit.id.as_str());
                    prompt.push_str(SEARCH_FALLBACK_NOTE);
                }
            }
        }

        Err(AppError::Internal(anyhow!(
            "Unit {} has an iteration cap of zero",
            unit.id.as_str()
        )))
    }

    fn model_for(&self, endpoint: EndpointKind) -> &Arc<dyn ChatModel> {
        match endpoint {
            EndpointKind::Research => &self.research_model,
            EndpointKind::Logic => &self.logic_model,
        }
    }
}

/// Builds the unit's prompt: task description plus one context section per
/// declared dependency. A missing dependency output is a scheduling bug.
fn assemble_prompt(
    unit: &UnitSpec,
    outputs: &HashMap<UnitId, String>,
) -> Result<String, AppError> {
    let mut prompt = unit.description.clone();

    if !unit.depends_on.is_empty() {
        prompt.push_str("\n\nContext from earlier pipeline steps:");
        for dep in &unit.depends_on {
            let output = outputs.get(dep).ok_or_else(|| {
                AppError::Internal(anyhow!(
                    "Unit {} scheduled before its dependency {} produced output",
                    unit.id.as_str(),
                    dep.as_str()
                ))
            })?;
            prompt.push_str(&format!("\n\n--- {} output ---\n{output}", dep.as_str()));
        }
    }

    Ok(prompt)
}

/// A model asks for a search by replying `SEARCH: <query>` on its first line.
fn parse_search_request(response: &str) -> Option<String> {
    let first_line = response.trim().lines().next()?;
    let query = first_line.strip_prefix("SEARCH:")?.trim();
    if query.is_empty() {
        None
    } else {
        Some(query.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::pipeline::units::{build_pipeline, RunInput};
    use crate::search::SearchError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted model: pops canned responses and records every prompt in a
    /// log shared across both endpoints, so global call order is observable.
    struct ScriptedModel {
        responses: Mutex<VecDeque<String>>,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedModel {
        fn new(responses: Vec<&str>, log: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into_iter().map(String::from).collect()),
                log,
            })
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
            self.log.lock().unwrap().push(prompt.to_string());
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| "unscripted response".to_string()))
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl SearchTool for FailingSearch {
        async fn search(&self, _query: &str) -> Result<String, SearchError> {
            Err(SearchError::NoResults)
        }
    }

    struct RecordingSearch {
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchTool for RecordingSearch {
        async fn search(&self, query: &str) -> Result<String, SearchError> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok("1. HR Director posting (https://example.com)\n   Leads people strategy".to_string())
        }
    }

    fn sample_input() -> RunInput {
        RunInput {
            resume_text: "Completed: SHRM-CP Certification".to_string(),
            job_url: "https://example.com/jobs/hr-director".to_string(),
            achievements: "Led 40% attrition reduction".to_string(),
            portfolio_url: None,
        }
    }

    #[tokio::test]
    async fn test_units_execute_in_declared_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let research = ScriptedModel::new(vec!["DOSSIER", "PROFILE"], log.clone());
        let logic = ScriptedModel::new(vec!["RESUME", "PREP"], log.clone());
        let orchestrator = Orchestrator::new(research, logic, None);

        let units = build_pipeline(&sample_input());
        orchestrator.run(&units).await.unwrap();

        let prompts = log.lock().unwrap();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[0].contains("Review this job link"));
        assert!(prompts[1].contains("Analyze this candidate text"));
        assert!(prompts[2].contains("Tailor the HR resume"));
        assert!(prompts[3].contains("interview questions"));
    }

    #[tokio::test]
    async fn test_dependency_outputs_are_fed_forward() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let research = ScriptedModel::new(vec!["DOSSIER-TEXT", "PROFILE-TEXT"], log.clone());
        let logic = ScriptedModel::new(vec!["RESUME-TEXT", "PREP-TEXT"], log.clone());
        let orchestrator = Orchestrator::new(research, logic, None);

        let units = build_pipeline(&sample_input());
        let outputs = orchestrator.run(&units).await.unwrap();

        let prompts = log.lock().unwrap();
        // Strategy sees research + profile outputs, not its own.
        assert!(prompts[2].contains("DOSSIER-TEXT"));
        assert!(prompts[2].contains("PROFILE-TEXT"));
        assert!(!prompts[2].contains("RESUME-TEXT"));
        // Interview prep sees all three prior outputs.
        assert!(prompts[3].contains("DOSSIER-TEXT"));
        assert!(prompts[3].contains("PROFILE-TEXT"));
        assert!(prompts[3].contains("RESUME-TEXT"));

        assert_eq!(outputs.resume, "RESUME-TEXT");
        assert_eq!(outputs.interview_prep, "PREP-TEXT");
    }

    #[tokio::test]
    async fn test_unit_never_runs_before_its_dependencies() {
        // A pipeline with strategy declared first violates the invariant
        // and must fail before any model call for that unit is made.
        let log = Arc::new(Mutex::new(Vec::new()));
        let research = ScriptedModel::new(vec![], log.clone());
        let logic = ScriptedModel::new(vec![], log.clone());
        let orchestrator = Orchestrator::new(research, logic, None);

        let mut units = build_pipeline(&sample_input());
        units.rotate_right(1); // interview_prep first

        let err = orchestrator.run(&units).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_request_is_served_and_answer_follows() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let research = ScriptedModel::new(
            vec!["SEARCH: hr director requirements", "DOSSIER", "PROFILE"],
            log.clone(),
        );
        let logic = ScriptedModel::new(vec!["RESUME", "PREP"], log.clone());
        let search = Arc::new(RecordingSearch {
            queries: Mutex::new(Vec::new()),
        });
        let orchestrator = Orchestrator::new(research, logic, Some(search.clone()));

        let units = build_pipeline(&sample_input());
        orchestrator.run(&units).await.unwrap();

        assert_eq!(
            search.queries.lock().unwrap().as_slice(),
            ["hr director requirements"]
        );
        let prompts = log.lock().unwrap();
        // 5 calls: research ran twice (tool loop), others once.
        assert_eq!(prompts.len(), 5);
        assert!(prompts[1].contains("SEARCH RESULTS for"));
    }

    #[tokio::test]
    async fn test_search_failure_falls_back_instead_of_aborting() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let research = ScriptedModel::new(
            vec!["SEARCH: hr director requirements", "DOSSIER", "PROFILE"],
            log.clone(),
        );
        let logic = ScriptedModel::new(vec!["RESUME", "PREP"], log.clone());
        let orchestrator = Orchestrator::new(research, logic, Some(Arc::new(FailingSearch)));

        let units = build_pipeline(&sample_input());
        let outputs = orchestrator.run(&units).await.unwrap();

        assert_eq!(outputs.resume, "RESUME");
        let prompts = log.lock().unwrap();
        assert!(prompts[1].contains("Web search is unavailable"));
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_as_llm_error() {
        struct BrokenModel;

        #[async_trait]
        impl ChatModel for BrokenModel {
            async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
                Err(LlmError::EmptyContent)
            }
        }

        let orchestrator =
            Orchestrator::new(Arc::new(BrokenModel), Arc::new(BrokenModel), None);
        let units = build_pipeline(&sample_input());
        let err = orchestrator.run(&units).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_parse_search_request() {
        assert_eq!(
            parse_search_request("SEARCH: hr director salary"),
            Some("hr director salary".to_string())
        );
        assert_eq!(parse_search_request("  SEARCH: padded  "), Some("padded".to_string()));
        assert_eq!(parse_search_request("SEARCH:"), None);
        assert_eq!(parse_search_request("Here is the dossier..."), None);
    }
}
