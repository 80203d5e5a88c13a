// Shared prompt fragments.
// Each feature that needs a completion defines its own prompts.rs alongside it;
// this file holds the pieces both the chat and the fit analyzer use.

/// Placeholder replaced with the subject's name.
pub const NAME_SLOT: &str = "{name}";
/// Placeholder replaced with the full serialized résumé.
pub const RESUME_SLOT: &str = "{resume_json}";

/// Keeps answers tied to the supplied résumé data.
pub const GROUNDING_INSTRUCTION: &str = "\
    Only state facts that appear in the resume data above. \
    Do NOT invent employers, dates, skills or credentials.";

/// Fills `{name}` and `{resume_json}` in a template.
pub fn fill_resume_template(template: &str, name: &str, resume_json: &str) -> String {
    template
        .replace(NAME_SLOT, name)
        .replace(RESUME_SLOT, resume_json)
}
