//! Prompt templates for the rewrite oracle.

/// Placeholder replaced by the passage to rewrite.
const TEXT_PLACEHOLDER: &str = "{text}";

/// Instruction used for humanizing rewrites.
pub const HUMANIZE_TEMPLATE: &str = "Rewrite the following text to make it sound more natural and human-like. \n\
Keep the same meaning and key information, but vary the sentence structure, \n\
use more casual language where appropriate, and make it feel like a person wrote it naturally.\n\
Don't add any preamble or explanation, just provide the rewritten text.\n\
\n\
Text to rewrite:\n\
{text}\n\
\n\
Rewritten text:";

/// Fill a template's `{text}` placeholder.
pub fn render(template: &str, text: &str) -> String {
    template.replacen(TEXT_PLACEHOLDER, text, 1)
}

pub fn humanize_prompt(text: &str) -> String {
    render(HUMANIZE_TEMPLATE, text)
}
