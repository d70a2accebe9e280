use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Market template choices offered by the create form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketTemplate {
    BinaryChoice,
    MultipleChoice,
}

impl MarketTemplate {
    /// Identifier used in the draft's `template` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTemplate::BinaryChoice => "binary_choice",
            MarketTemplate::MultipleChoice => "multiple_choice",
        }
    }

    /// Parse a template identifier. Returns None for anything outside the set.
    pub fn parse(s: &str) -> Option<MarketTemplate> {
        match s {
            "binary_choice" => Some(MarketTemplate::BinaryChoice),
            "multiple_choice" => Some(MarketTemplate::MultipleChoice),
            _ => None,
        }
    }
}

/// In-progress, user-editable market specification.
/// All fields stay raw strings while editing; [`validate`] turns them into
/// a [`ValidatedDraft`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarketDraft {
    pub template: String,
    pub subject: String,
    pub description: String,
    /// Comma-separated outcome labels, e.g. "Yes, No".
    #[serde(rename = "outcomes")]
    pub outcomes_raw: String,
}

/// Draft that passed field validation. Only produced by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    pub template: MarketTemplate,
    pub subject: String,
    /// Collected and validated but intentionally not part of the on-chain
    /// request (off-chain context only).
    pub description: String,
    pub outcomes_raw: String,
}

/// One field of the draft, used to attribute validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Template,
    Subject,
    Description,
    Outcomes,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Template => "template",
            DraftField::Subject => "subject",
            DraftField::Description => "description",
            DraftField::Outcomes => "outcomes",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-attributed validation errors. Every invalid field is reported so a
/// caller can annotate the whole form at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<DraftField, String>,
}

impl FieldErrors {
    pub fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validate a draft. Pure; reports every invalid field, not just the first.
pub fn validate(draft: &MarketDraft) -> Result<ValidatedDraft, FieldErrors> {
    let mut errors = FieldErrors::default();

    let template = if draft.template.is_empty() {
        errors.insert(DraftField::Template, "Template is required");
        None
    } else {
        match MarketTemplate::parse(&draft.template) {
            Some(t) => Some(t),
            None => {
                errors.insert(
                    DraftField::Template,
                    format!("Unknown template: {}", draft.template),
                );
                None
            }
        }
    };

    if draft.subject.is_empty() {
        errors.insert(DraftField::Subject, "Subject is required");
    }
    if draft.description.is_empty() {
        errors.insert(DraftField::Description, "Description is required");
    }
    if draft.outcomes_raw.is_empty() {
        errors.insert(
            DraftField::Outcomes,
            "Outcomes are required (comma-separated)",
        );
    }

    match template {
        // template being Some implies no template error was recorded
        Some(template) if errors.is_empty() => Ok(ValidatedDraft {
            template,
            subject: draft.subject.clone(),
            description: draft.description.clone(),
            outcomes_raw: draft.outcomes_raw.clone(),
        }),
        _ => Err(errors),
    }
}
