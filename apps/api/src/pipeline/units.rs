//! Task Pipeline — declares the four units and their dependency wiring.
//!
//! This module contains no execution logic; the orchestrator runs the units.
//! A `UnitSpec` is immutable once built and one set exists per run.

use serde::Serialize;

use crate::pipeline::prompts;

/// Per-unit cap on model iterations (tool loop included).
pub const MAX_UNIT_ITERATIONS: u32 = 2;

/// The four pipeline units, in declared execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitId {
    Research,
    Profile,
    Strategy,
    InterviewPrep,
}

impl UnitId {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitId::Research => "research",
            UnitId::Profile => "profile",
            UnitId::Strategy => "strategy",
            UnitId::InterviewPrep => "interview_prep",
        }
    }
}

/// Which model endpoint a unit is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// Gemini — research and profile units.
    Research,
    /// Groq — strategy and interview-prep units.
    Logic,
}

/// Tools a unit is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    WebSearch,
}

/// One declared unit of work: role binding, task text, endpoint, tool set,
/// iteration cap, and the prior-unit outputs it may read.
#[derive(Debug, Clone)]
pub struct UnitSpec {
    pub id: UnitId,
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    pub endpoint: EndpointKind,
    pub tools: Vec<ToolKind>,
    pub max_iter: u32,
    pub depends_on: Vec<UnitId>,
    pub description: String,
}

impl UnitSpec {
    /// Composes the system prompt from the unit's role binding.
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!(
            "You are {role}. {backstory} Your goal: {goal}",
            role = self.role,
            backstory = self.backstory,
            goal = self.goal
        );
        if self.tools.contains(&ToolKind::WebSearch) {
            prompt.push_str("\n\n");
            prompt.push_str(prompts::SEARCH_TOOL_INSTRUCTION);
        }
        prompt
    }

    pub fn has_tool(&self, tool: ToolKind) -> bool {
        self.tools.contains(&tool)
    }
}

/// User-supplied inputs for one pipeline run. Transient: exists only for
/// the duration of the run.
#[derive(Debug, Clone)]
pub struct RunInput {
    pub resume_text: String,
    pub job_url: String,
    pub achievements: String,
    pub portfolio_url: Option<String>,
}

/// Builds the four units in declared order with the fixed dependency chain:
/// research → (profile independent) → strategy {research, profile} →
/// interview-prep {research, profile, strategy}.
pub fn build_pipeline(input: &RunInput) -> Vec<UnitSpec> {
    let portfolio = match &input.portfolio_url {
        Some(url) if !url.trim().is_empty() => {
            format!("Portfolio / LinkedIn: {url}\n")
        }
        _ => String::new(),
    };

    vec![
        UnitSpec {
            id: UnitId::Research,
            role: prompts::RESEARCH_ROLE,
            goal: prompts::RESEARCH_GOAL,
            backstory: prompts::RESEARCH_BACKSTORY,
            endpoint: EndpointKind::Research,
            tools: vec![ToolKind::WebSearch],
            max_iter: MAX_UNIT_ITERATIONS,
            depends_on: vec![],
            description: prompts::RESEARCH_TASK_TEMPLATE.replace("{job_url}", &input.job_url),
        },
        UnitSpec {
            id: UnitId::Profile,
            role: prompts::PROFILE_ROLE,
            goal: prompts::PROFILE_GOAL,
            backstory: prompts::PROFILE_BACKSTORY,
            endpoint: EndpointKind::Research,
            tools: vec![],
            max_iter: MAX_UNIT_ITERATIONS,
            depends_on: vec![],
            description: prompts::PROFILE_TASK_TEMPLATE
                .replace("{resume_text}", &input.resume_text)
                .replace("{achievements}", &input.achievements)
                .replace("{portfolio}", &portfolio),
        },
        UnitSpec {
            id: UnitId::Strategy,
            role: prompts::STRATEGY_ROLE,
            goal: prompts::STRATEGY_GOAL,
            backstory: prompts::STRATEGY_BACKSTORY,
            endpoint: EndpointKind::Logic,
            tools: vec![],
            max_iter: MAX_UNIT_ITERATIONS,
            depends_on: vec![UnitId::Research, UnitId::Profile],
            description: prompts::STRATEGY_TASK.to_string(),
        },
        UnitSpec {
            id: UnitId::InterviewPrep,
            role: prompts::INTERVIEW_ROLE,
            goal: prompts::INTERVIEW_GOAL,
            backstory: prompts::INTERVIEW_BACKSTORY,
            endpoint: EndpointKind::Logic,
            tools: vec![],
            max_iter: MAX_UNIT_ITERATIONS,
            depends_on: vec![UnitId::Research, UnitId::Profile, UnitId::Strategy],
            description: prompts::INTERVIEW_TASK.to_string(),
        },
    ]
}
