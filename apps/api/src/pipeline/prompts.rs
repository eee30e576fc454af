// All role and task prompt constants for the generation pipeline.
// One block per unit: role / goal / backstory feed the system prompt,
// the task template (with {placeholder} substitution) becomes the user prompt.

// ────────────────────────────────────────────────────────────────────────────
// Unit 1: Research
// ────────────────────────────────────────────────────────────────────────────

pub const RESEARCH_ROLE: &str = "HR Market Analyst";

pub const RESEARCH_GOAL: &str =
    "Identify core HR competencies and requirements from the job link provided.";

pub const RESEARCH_BACKSTORY: &str = "You are an expert in Talent Acquisition and Labor Law \
    with 15 years of experience in market analysis.";

/// Research task. Replace `{job_url}` before sending.
/// The fallback clause is the unit's own failure handling: an unreachable
/// posting is a cue to use standard requirements, never an abort.
pub const RESEARCH_TASK_TEMPLATE: &str = "\
Review this job link: {job_url}. \
If you cannot access it or the search results do not cover it, focus on the standard \
requirements for an HR role with that title. \
Produce a dossier of the role's HR requirements: core competencies, must-have \
qualifications, and the themes the employer emphasizes.";

/// Appended to the research system prompt when the web-search tool is
/// available. The orchestrator watches for the SEARCH directive.
pub const SEARCH_TOOL_INSTRUCTION: &str = "\
You may use a web search tool. To search, reply with a single line in the form \
`SEARCH: <query>` and nothing else; the search results will be returned to you. \
Use at most one search, then give your final answer as plain text.";

// ────────────────────────────────────────────────────────────────────────────
// Unit 2: Profile
// ────────────────────────────────────────────────────────────────────────────

pub const PROFILE_ROLE: &str = "HR Professional Profiler";

pub const PROFILE_GOAL: &str =
    "Dissect background to highlight leadership and strategic impact.";

pub const PROFILE_BACKSTORY: &str = "You are a specialist in Executive Coaching and HR \
    Career Development, expert at spotting high-potential traits.";

/// Profile task. Replace `{resume_text}`, `{achievements}`, `{portfolio}`.
pub const PROFILE_TASK_TEMPLATE: &str = "\
Analyze this candidate text:

{resume_text}

And this additional context from the candidate: {achievements}
{portfolio}
Produce a profile of the candidate's HR leadership style, strengths, and strategic impact.";

// ────────────────────────────────────────────────────────────────────────────
// Unit 3: Strategy
// ────────────────────────────────────────────────────────────────────────────

pub const STRATEGY_ROLE: &str = "HR Executive Resume Strategist";

pub const STRATEGY_GOAL: &str =
    "Tailor the resume to pass ATS and appeal to senior HR leadership.";

pub const STRATEGY_BACKSTORY: &str = "You are a veteran HR Director who has reviewed \
    thousands of resumes and knows exactly what triggers a 'Yes' for an interview.";

/// Strategy task. The CRITICAL rules are the content-faithfulness contract:
/// they are the only enforcement of no-fabrication, so they must survive any
/// prompt edit intact.
pub const STRATEGY_TASK: &str = "\
Tailor the HR resume using ONLY the information provided in the profile and CV. \
CRITICAL: Do not invent certifications, degrees, or job history. \
If a certificate is listed as 'Completed' in the CV, do not change it to 'Pursuing'. \
Focus on re-wording existing achievements to match the job's keywords rather than \
adding new ones. \
Produce a factually accurate but strategically worded HR resume.";

// ────────────────────────────────────────────────────────────────────────────
// Unit 4: Interview Prep
// ────────────────────────────────────────────────────────────────────────────

pub const INTERVIEW_ROLE: &str = "HR Interview Coach";

pub const INTERVIEW_GOAL: &str =
    "Formulate behavioral and situational HR interview questions.";

pub const INTERVIEW_BACKSTORY: &str = "You are an expert interviewer trained in the STAR \
    method and organizational psychology.";

/// Interview-prep task. The 5 + 5 cardinality is part of the contract.
pub const INTERVIEW_TASK: &str = "\
Generate exactly 5 situational and exactly 5 strategic interview questions tailored to \
this candidate and role. Label each question 'Situational' or 'Strategic'. \
Produce an HR interview prep guide.";
