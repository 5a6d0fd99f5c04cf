use super::blueprint::FormBlueprint;
use super::domain::Section;
use super::values::{ErrorMap, FormValues};

/// Outcome of validating every section at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    pub errors: ErrorMap,
    pub first_invalid_section: Option<usize>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Required-field errors for a single section.
pub fn section_errors(section: &Section, values: &FormValues) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for question in section.required_questions() {
        if !values.is_filled(&question.id) {
            errors.insert(question.id.clone(), question.required_message());
        }
    }
    errors
}

pub fn validate_form(blueprint: &FormBlueprint, values: &FormValues) -> FormValidation {
    let mut validation = FormValidation::default();

    for (index, section) in blueprint.sections().iter().enumerate() {
        let errors = section_errors(section, values);
        if !errors.is_empty() && validation.first_invalid_section.is_none() {
            validation.first_invalid_section = Some(index);
        }
        validation.errors.extend(errors);
    }

    validation
}
