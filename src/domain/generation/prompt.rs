//! Prompt compilation.
//!
//! Combines the fixed system instruction, profile context, prior
//! decisions, and the current decision text into a single prompt plus a
//! sampling configuration. Pure and fully deterministic given identical
//! inputs.

use serde::{Deserialize, Serialize};

use crate::domain::decision::DecisionSummary;

/// Maximum number of prior decisions carried into a prompt.
pub const MAX_PRIOR_DECISIONS: usize = 5;

/// Fixed system instruction prepended to every generation prompt.
const SYSTEM_PROMPT: &str = "You are an AI life simulation engine specialized in generating realistic future timelines based on life decisions. Your role is to:

1. Analyze the user's decision in the context of their profile (risk tolerance, priorities, current situation)
2. Generate 3-5 distinct, realistic future timelines with different outcomes
3. Each timeline should represent a plausible path with clear trade-offs
4. Include both first-order and second-order effects
5. Be balanced - show both positive and negative possibilities
6. Consider emotional, financial, career, relationship, and risk dimensions

For each timeline, provide:
- A memorable title (e.g., \"The Bold Leap\", \"Safe Harbor\", \"The Balanced Path\")
- A 2-3 sentence summary
- Probability (0-100) based on how likely this outcome is given the user's profile
- Metrics (0-100 score + trend for each dimension)
- 4-6 key events across different time periods (3 months, 6 months, 1 year, 2 years, 5 years)
- Key trade-offs
- Second-order effects (unexpected consequences)

Be specific, realistic, and insightful. Avoid generic advice.";

/// JSON schema block appended to the prompt so the model knows the
/// exact output shape expected.
const OUTPUT_SCHEMA: &str = r#"{
  "timelines": [
    {
      "title": "string",
      "summary": "string",
      "probability": number,
      "metrics": {
        "emotional": { "score": number, "trend": "up" | "stable" | "down" },
        "financial": { "score": number, "trend": "up" | "stable" | "down" },
        "career": { "score": number, "trend": "up" | "stable" | "down" },
        "relationships": { "score": number, "trend": "up" | "stable" | "down" },
        "risk": { "score": number, "trend": "up" | "stable" | "down" }
      },
      "events": [
        { "period": "string", "description": "string", "impact": "positive" | "neutral" | "negative" }
      ],
      "tradeoffs": ["string"],
      "secondOrderEffects": ["string"]
    }
  ]
}"#;

/// Sampling configuration handed to the text-generation capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Response randomness (0.0 = deterministic, 1.0+ = creative).
    pub temperature: f32,
    /// Nucleus sampling cutoff.
    pub top_p: Option<f32>,
    /// Maximum completion length in tokens.
    pub max_output_tokens: u32,
    /// Request machine-parseable JSON output where the backend supports
    /// it. The extractor must not assume the request was honored.
    pub json_output: bool,
}

impl SamplingConfig {
    /// Configuration for first-generation creative breadth.
    pub fn first_generation() -> Self {
        Self {
            temperature: 0.8,
            top_p: Some(0.95),
            max_output_tokens: 8192,
            json_output: true,
        }
    }

    /// Configuration for injection continuity (lower temperature).
    pub fn injection() -> Self {
        Self {
            temperature: 0.7,
            top_p: None,
            max_output_tokens: 4096,
            json_output: true,
        }
    }
}

/// Everything the compiler needs to build one prompt.
#[derive(Debug, Clone)]
pub struct PromptRequest<'a> {
    /// The current decision text.
    pub decision_text: &'a str,
    /// Pre-rendered profile context block.
    pub profile_context: &'a str,
    /// Prior decisions, newest first; truncated to [`MAX_PRIOR_DECISIONS`].
    pub prior_decisions: &'a [DecisionSummary],
    /// Original decision content when compiling an injection prompt.
    pub parent_content: Option<&'a str>,
}

/// A compiled prompt plus its sampling configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPrompt {
    pub text: String,
    pub sampling: SamplingConfig,
}

/// Compiles a prompt for the text-generation capability.
///
/// When `parent_content` is set the decision text is rewritten into an
/// explicit causal frame so the model conditions on continuity with the
/// prior decision rather than treating the follow-up as independent.
pub fn compile(request: &PromptRequest<'_>) -> GenerationPrompt {
    let decision_text = match request.parent_content {
        Some(original) => format!(
            "Following my previous decision to \"{}\", I now want to: {}",
            original, request.decision_text
        ),
        None => request.decision_text.to_string(),
    };

    let mut prompt = String::new();
    prompt.push_str(SYSTEM_PROMPT);
    prompt.push_str("\n\n");
    prompt.push_str(request.profile_context);
    prompt.push('\n');

    let prior = &request.prior_decisions
        [..request.prior_decisions.len().min(MAX_PRIOR_DECISIONS)];
    if !prior.is_empty() {
        prompt.push_str("\nPrevious Decisions:\n");
        for (i, decision) in prior.iter().enumerate() {
            prompt.push_str(&format!("{}. {}", i + 1, decision.content));
            if let Some(category) = &decision.category {
                prompt.push_str(&format!(" ({})", category));
            }
            prompt.push('\n');
        }
    }

    prompt.push_str(&format!("\nCurrent Decision: \"{}\"\n", decision_text));
    prompt.push_str(
        "\nGenerate 3-5 distinct future timelines for this decision. \
         Return ONLY valid JSON matching this exact schema:\n\n",
    );
    prompt.push_str(OUTPUT_SCHEMA);

    let sampling = if request.parent_content.is_some() {
        SamplingConfig::injection()
    } else {
        SamplingConfig::first_generation()
    };

    GenerationPrompt {
        text: prompt,
        sampling,
    }
}
