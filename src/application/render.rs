//! Marker substitution for template subjects and bodies.

use crate::domain::entities::recipient::Recipient;

/// Replaces every `{{name}}`, `{{company}}`, `{{jobTitle}}` and `{{role}}`
/// marker with the recipient's data. `{{role}}` is an alias for the job
/// title. Missing values substitute as empty strings; markers the renderer
/// does not know are left untouched.
pub fn substitute_markers(text: &str, recipient: &Recipient) -> String {
    let name = recipient.name.as_deref().unwrap_or("");
    let company = recipient.company.as_deref().unwrap_or("");
    let job_title = recipient.job_title.as_deref().unwrap_or("");

    text.replace("{{name}}", name)
        .replace("{{company}}", company)
        .replace("{{jobTitle}}", job_title)
        .replace("{{role}}", job_title)
}
