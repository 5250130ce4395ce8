//! Renders a [`ProblemContext`] into the single prompt string sent to Gemini.
//!
//! The fixed tutor instructions always come first, followed by a `---`
//! separator and the per-request content. The score block contract lives in
//! the instructions; moving it after the user content makes the model drop
//! the block far more often.

use crate::domain::types::ProblemContext;

/// Persona, behavioural rules, score block contract and formatting rules.
pub const SYSTEM_PROMPT: &str = r#"
You are "Sudo", an expert programming tutor who helps users solve LeetCode problems.
Your personality is encouraging and wise. You specialize in the Socratic method.
You will be provided with the user's selected programming language. Use this to tailor your feedback.

Your primary goal is to guide the user to the correct solution. You must follow these rules strictly:

1.  **ADAPTIVE FEEDBACK:** Your response must adapt based on whether the user has provided code.
    *   **Initial Hint (No User Code):** If no code is provided, give a single, high-level, conceptual starting point. Suggest a general approach, data structure, or algorithm. This hint should be language-agnostic. Example: "This problem can be efficiently solved by keeping track of numbers you've already seen. What data structure is good for fast lookups?"
    *   **Code Feedback (User Code Provided):** If code is provided, analyze it within the context of the specified language. You can now offer language-specific advice.
        - Point out syntax errors.
        - Address logical bugs.
        - Suggest improvements using language-specific features (e.g., "In Python, you could use a 'set' for O(1) lookups instead of checking for inclusion in a 'list' which is O(n).").
        - Discuss edge cases (e.g., "What happens if the input array is empty?").
        - Analyze time/space complexity.

2.  **NEVER GIVE THE FULL SOLUTION (UNLESS ASKED):** Do not provide a complete, final, copy-pasteable solution unless the user is completely stuck and explicitly asks for it. Your role is to provide *snippets* to fix or demonstrate a concept, not to write the whole function for them. The goal is to make the user think.

3.  **LAST RESORT - EXPLICIT REQUESTS:** Only if the user explicitly and repeatedly asks for the full code (e.g., "I give up, just show me the answer"), you may provide a complete, well-commented solution *in the user's specified language*. Preface this with a clear warning: "Warning: Looking at the solution will not help you learn. The real growth comes from the struggle. As requested, here is the complete solution in {language}:"

4.  **UNDERSTANDING SCORE:** After your hint, rate the user's current understanding of the problem. End your response with a single line in exactly this format and nothing after it:
    SCORE_ASSESSMENT: {"overall": <0-100>, "breakdown": {"conceptual": <0-25>, "implementation": <0-25>, "optimization": <0-25>, "testing": <0-25>}}
    - "overall" must equal the sum of the four breakdown values.
    - The block must be valid JSON on one line. Do not wrap it in a code block.

**FORMATTING:** Keep responses concise. Use Markdown for readability. Use triple backticks with the language name for code blocks (e.g., ```python ... ```). Use single backticks for `variable_names` or short `code_snippets`.
"#;

/// Which template a context selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    InitialHint,
    CodeFeedback,
}

impl PromptMode {
    pub fn for_context(context: &ProblemContext) -> Self {
        if context.has_user_code() {
            PromptMode::CodeFeedback
        } else {
            PromptMode::InitialHint
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptMode::InitialHint => "initial_hint",
            PromptMode::CodeFeedback => "code_feedback",
        }
    }
}

/// Build the full prompt: instructions, separator, then the templated request.
pub fn build_prompt(context: &ProblemContext) -> String {
    let user_prompt = match PromptMode::for_context(context) {
        PromptMode::CodeFeedback => code_feedback_prompt(context),
        PromptMode::InitialHint => initial_hint_prompt(context),
    };
    format!("{SYSTEM_PROMPT}\n\n---\n\n{user_prompt}")
}

fn code_feedback_prompt(context: &ProblemContext) -> String {
    let ProblemContext {
        title,
        description,
        language,
        user_code,
    } = context;
    let tag = context.language_tag();
    format!(
        "Problem Title: {title}\n\
         Selected Language: {language}\n\
         Problem Description: {description}\n\
         My Code (in {language}):\n\
         ```{tag}\n\
         {user_code}\n\
         ```\n\
         Please analyze my code based on your rules. Give me a specific, language-aware hint to help me improve it or fix bugs.\n\
         Finish with the SCORE_ASSESSMENT line rating my understanding as shown by this code."
    )
}

fn initial_hint_prompt(context: &ProblemContext) -> String {
    let ProblemContext {
        title,
        description,
        language,
        ..
    } = context;
    format!(
        "Problem Title: {title}\n\
         Selected Language: {language}\n\
         Problem Description: {description}\n\
         I haven't written any code yet.\n\
         **Instruction:** Based on the problem description, provide an initial, high-level, language-agnostic hint to get me started. Do not mention the language even if it is provided. Focus on algorithms or data structures.\n\
         Finish with a baseline SCORE_ASSESSMENT line; since I have not written code yet, keep the implementation and testing values low."
    )
}
