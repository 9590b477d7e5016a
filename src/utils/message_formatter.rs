//! Pure functions for birthday message formatting
use crate::constants::BIRTHDAY_SUBJECT;

/// Body sent to every matched person
pub const DEFAULT_BODY_TEMPLATE: &str = "Hi {name},

Wishing you a very Happy Birthday! 🎉🎂
May your year be filled with joy, success, and happiness.

Best Regards,
{company}
";

/// Replace placeholders in a message template
pub fn apply_message_template(template: &str, name: &str, company: &str) -> String {
    template
        .replace("{name}", name)
        .replace("{company}", company)
}

/// Fixed subject and body template shared by every message of a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageTemplate {
    subject: String,
    body: String,
    company: String,
}

impl MessageTemplate {
    /// The standard birthday greeting signed by `company`
    pub fn birthday(company: impl Into<String>) -> Self {
        Self {
            subject: BIRTHDAY_SUBJECT.to_string(),
            body: DEFAULT_BODY_TEMPLATE.to_string(),
            company: company.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Render the body for one recipient
    pub fn render_body(&self, name: &str) -> String {
        apply_message_template(&self.body, name, &self.company)
    }
}
