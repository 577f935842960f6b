//! Prompt construction for every API endpoint.
//!
//! Handlers stay thin: each endpoint maps its input onto one of these
//! builders, which return a ready [`GenerationRequest`].

use crate::models::{AdvisorRequest, GraderRequest, ProposalContext};
use medstat_core::prelude::*;
use serde_json::json;

/// Generate a chapter quiz in structured-data mode
pub fn quiz_request(chapter_title: &str) -> GenerationRequest {
    let system_instruction = format!(
        "You are an expert on the eleven-chapter medical-statistics curriculum. \
         Drawing only on the chapter \"{chapter_title}\", write 20 randomized \
         multiple-choice questions, each with 4 options (A, B, C, D) and exactly \
         one correct answer. Provide a short explanation for the correct answer. \
         Strictly follow the provided JSON schema."
    );
    let user_query = format!("Write 20 multiple-choice questions for \"{chapter_title}\".");

    GenerationRequest::new(user_query, system_instruction).with_schema(quiz_schema())
}

/// Schema the quiz endpoint asks the model to conform to
pub fn quiz_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": {"type": "STRING"},
                "options": {
                    "type": "ARRAY",
                    "items": {"type": "STRING"},
                    "minItems": 4,
                    "maxItems": 4
                },
                "correct_answer_index": {"type": "NUMBER"},
                "explanation": {"type": "STRING"}
            },
            "required": ["question", "options", "correct_answer_index", "explanation"]
        }
    })
}

const PROPOSAL_SYSTEM_PROMPT: &str =
    "You are a research methodology advisor with deep knowledge of the \
     eleven-chapter medical-statistics curriculum. Help the student develop \
     their research proposal.";

/// The fixed steps of the proposal-builder flow.
///
/// A closed set: the handler rejects anything that does not parse into one of
/// these variants before touching the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStep {
    Title,
    Problem,
    LitReview,
    GeneralObjective,
    SpecificObjectives,
    Methods,
    SampleSize,
    Analysis,
    Ethics,
    References,
}

impl ProposalStep {
    /// Parse the wire name of a step
    pub fn parse(step: &str) -> Option<Self> {
        match step {
            "proposal-title" => Some(ProposalStep::Title),
            "proposal-problem" => Some(ProposalStep::Problem),
            "proposal-lit-review" => Some(ProposalStep::LitReview),
            "proposal-general" => Some(ProposalStep::GeneralObjective),
            "proposal-specific" => Some(ProposalStep::SpecificObjectives),
            "proposal-methods" => Some(ProposalStep::Methods),
            "proposal-sample" => Some(ProposalStep::SampleSize),
            "proposal-analysis" => Some(ProposalStep::Analysis),
            "proposal-ethics" => Some(ProposalStep::Ethics),
            "proposal-references" => Some(ProposalStep::References),
            _ => None,
        }
    }

    /// Steps that search the web cite their sources
    pub fn uses_grounding(&self) -> bool {
        matches!(self, ProposalStep::LitReview | ProposalStep::References)
    }

    /// Build the generation request for this step from prior-step context
    pub fn to_request(self, context: &ProposalContext) -> GenerationRequest {
        let user_query = match self {
            ProposalStep::Title => format!(
                "I have an idea for a research topic (it may appear in the problem \
                 statement below). Suggest 3 scientifically rigorous titles for it, \
                 following the guidance of Chapter 2.\nContext: {}",
                context.problem()
            ),
            ProposalStep::Problem => format!(
                "Based on the following problem statement: \"{}\", help me refine it \
                 into the three-paragraph structure (background, knowledge gap, \
                 urgency) described in Chapter 2.",
                context.problem()
            ),
            ProposalStep::LitReview => format!(
                "For the topic: \"{}\", use Google Search to find and briefly \
                 summarize 3-5 related studies (a short literature review), focusing \
                 on their key findings and the remaining knowledge gap.",
                context.title_or_placeholder()
            ),
            ProposalStep::GeneralObjective => format!(
                "From the following problem statement: \"{}\", suggest one general \
                 objective, following Chapter 2.",
                context.problem()
            ),
            ProposalStep::SpecificObjectives => format!(
                "From the following general objective: \"{}\", suggest 2-3 specific \
                 objectives meeting the SMART criteria, following Chapter 2.",
                context.general()
            ),
            ProposalStep::Methods => format!(
                "For the objective: \"{}\", suggest a detailed 'Subjects and Methods' \
                 section (following Chapters 3 and 4), covering:\n1. Study design.\n\
                 2. Study population.\n3. Inclusion and exclusion criteria.",
                context.general()
            ),
            ProposalStep::SampleSize => format!(
                "For the following study design: \"{}\", suggest an appropriate \
                 sample-size formula and a sampling method, following Chapter 3.",
                context.methods()
            ),
            ProposalStep::Analysis => format!(
                "Based on the following specific objectives: \"{}\", suggest the \
                 matching statistical analyses, following Chapters 5 and 11.",
                context.specific()
            ),
            ProposalStep::Ethics => "Suggest the essential contents of the 'Research \
                 Ethics' section of a biomedical study proposal, following Chapter 6."
                .to_string(),
            ProposalStep::References => format!(
                "For the topic: \"{}\", use Google Search to find 3 key references \
                 and format them in Vancouver style.",
                context.title_or_placeholder()
            ),
        };

        let request = GenerationRequest::new(user_query, PROPOSAL_SYSTEM_PROMPT);
        if self.uses_grounding() {
            request.with_grounding()
        } else {
            request
        }
    }
}

/// Recommend a statistical test for the described analysis
pub fn advisor_request(body: &AdvisorRequest) -> GenerationRequest {
    let user_query = format!(
        "I want to {}, comparing {}. My outcome variable is {} and its \
         distribution is {}. Which statistical test should I use?",
        body.goal, body.groups, body.var_type, body.dist
    );
    let system_instruction =
        "You are a medical-statistics expert working strictly from Chapter 11 of \
         the curriculum (in particular its test-selection table). Name the \
         appropriate statistical test (for example Independent t-test or \
         Chi-square), explain briefly why it fits, and give the SPSS menu path \
         (for example Analyze > Compare Means > ...).";

    GenerationRequest::new(user_query, system_instruction)
}

/// Review one section of a student manuscript
pub fn grader_request(body: &GraderRequest) -> GenerationRequest {
    let user_query = format!(
        "This is the \"{}\" section of my manuscript. Please give feedback:\n\n\"{}\"",
        body.section, body.text
    );
    let system_instruction =
        "You are a scientific peer reviewer working strictly from Chapter 6 \
         (writing a research report). Read the student's paragraph and give 3 \
         constructive comments: (1) strengths, (2) points to improve, and (3) \
         anything missing from the standard IMRAD structure.";

    GenerationRequest::new(user_query, system_instruction)
}

/// Invent a practice research scenario
pub fn scenario_request() -> GenerationRequest {
    let user_query =
        "Write a short, realistic medical-research scenario (2-3 sentences) for \
         students. It must contain an unresolved question, so the students have \
         to pick a study design (Chapter 3) or a data-collection method \
         (Chapter 4).";
    let system_instruction =
        "You are a medical-statistics lecturer. Invent engaging, challenging \
         research scenarios grounded in the eleven-chapter curriculum.";

    GenerationRequest::new(user_query, system_instruction)
}

/// Grounded Q&A over the whole curriculum
pub fn assistant_request(query: &str) -> GenerationRequest {
    let system_instruction =
        "You are the course AI assistant, trained on the eleven-chapter \
         medical-statistics and research-methods curriculum. Answer only \
         questions grounded in this curriculum. Use Google Search to look up the \
         concepts involved and answer precisely. Always try to cite your sources.";

    GenerationRequest::new(query, system_instruction).with_grounding()
}

/// Grounded chat restricted to research ethics
pub fn ethics_request(query: &str) -> GenerationRequest {
    let system_instruction =
        "You are an expert on medical research ethics. Your task is to answer \
         only questions about ethical principles, the Declaration of Helsinki, \
         the Belmont Report, and the CIOMS guidelines.\n\n\
         The text of the Declaration of Helsinki is available on the page. You \
         may use Google Search to look up further details on other ethical \
         principles.\n\n\
         If the user asks about statistics (p-values, t-tests), SPSS, or how to \
         write a proposal, politely decline and point them to the 'AI Tools' or \
         general 'AI Assistant' pages instead.";

    GenerationRequest::new(query, system_instruction).with_grounding()
}
