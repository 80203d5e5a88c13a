/// Job-fit system instruction. The job description itself is the prompt.
/// Replace: {name}, {resume_json}.
pub const FIT_SYSTEM_TEMPLATE: &str = "\
You are a career consultant. Compare {name}'s resume ({resume_json}) with the user's Job Description.
Output format: Markdown.
1. Match Score (0-100%)
2. Top 3 Matching Skills (Bullet points)
3. Brief Summary (Why {name} fits).
4. Keep it encouraging but realistic.";

/// Rendered when the completion is unavailable.
pub const FIT_FAILURE_MESSAGE: &str = "Analysis failed. Please try again.";

/// Shown in the result area while a request is in flight.
pub const FIT_BUSY_MESSAGE: &str = "Reading the job description...";

pub const ANALYZE_LABEL: &str = "Analyze Match";
pub const ANALYZING_LABEL: &str = "Analyzing...";

pub const CALL_TO_ACTION_LABEL: &str = "Schedule an Interview";
