use tracing::{debug, info, warn};

use super::blueprint::FormBlueprint;
use super::transport::{SubmissionReceipt, SubmissionTransport, TransportError};
use super::validation::{section_errors, validate_form};
use super::values::{ErrorMap, FormValues};
use super::view::{FormScreen, StepView};

/// Notice shown when the submission endpoint fails.
pub const SUBMISSION_FAILED_NOTICE: &str = "Failed to send your application. Please try again.";

/// Result of a navigation request. `Moved` means the view scrolls back to the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved { from: usize, to: usize },
    Blocked,
    AtBoundary,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Delivered(SubmissionReceipt),
    Invalid {
        first_invalid_section: usize,
        navigation: Navigation,
    },
    Failed(TransportError),
}

/// Drives the wizard: step position, answers, validation and final submission.
#[derive(Debug, Clone)]
pub struct FormController<'a> {
    blueprint: &'a FormBlueprint,
    current_section: usize,
    values: FormValues,
    errors: ErrorMap,
    submitted: bool,
    notice: Option<String>,
}

impl FormController<'static> {
    pub fn standard() -> Self {
        Self::new(FormBlueprint::standard())
    }
}

impl<'a> FormController<'a> {
    pub fn new(blueprint: &'a FormBlueprint) -> Self {
        Self {
            blueprint,
            current_section: 0,
            values: FormValues::new(),
            errors: ErrorMap::new(),
            submitted: false,
            notice: None,
        }
    }

    pub fn blueprint(&self) -> &'a FormBlueprint {
        self.blueprint
    }

    pub fn current_section_index(&self) -> usize {
        self.current_section
    }

    pub fn is_last_section(&self) -> bool {
        self.current_section == self.blueprint.last_index()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn on_field_change(&mut self, question_id: &str, value: impl Into<String>) {
        let value = value.into();
        let value = match self.blueprint.question(question_id) {
            Some(question) => question.normalize_input(value),
            None => value,
        };
        self.values.set(question_id, value);
        self.errors.clear_field(question_id);
    }

    /// Checks one section's required fields, replacing only that section's
    /// entries in the error map.
    pub fn validate_section(&mut self, index: usize) -> bool {
        let blueprint = self.blueprint;
        let Some(section) = blueprint.section(index) else {
            return false;
        };

        let errors = section_errors(section, &self.values);
        let valid = errors.is_empty();
        self.errors.retain(|id| !section.contains(id));
        self.errors.extend(errors);

        debug!(section = index, valid, "section validated");
        valid
    }

    pub fn advance(&mut self) -> Navigation {
        if !self.validate_section(self.current_section) {
            return Navigation::Blocked;
        }
        if self.is_last_section() {
            return Navigation::AtBoundary;
        }
        self.move_to(self.current_section + 1)
    }

    pub fn retreat(&mut self) -> Navigation {
        if self.current_section == 0 {
            return Navigation::AtBoundary;
        }
        self.move_to(self.current_section - 1)
    }

    /// Validates every section and, when complete, hands the answers to the transport once.
    pub async fn submit_all<T>(&mut self, transport: &T) -> SubmitOutcome
    where
        T: SubmissionTransport + ?Sized,
    {
        let validation = validate_form(self.blueprint, &self.values);
        self.errors = validation.errors;

        if let Some(first_invalid_section) = validation.first_invalid_section {
            let navigation = if first_invalid_section != self.current_section {
                self.move_to(first_invalid_section)
            } else {
                Navigation::Blocked
            };
            info!(
                missing = self.errors.len(),
                first_invalid_section, "submission blocked by validation"
            );
            return SubmitOutcome::Invalid {
                first_invalid_section,
                navigation,
            };
        }

        match transport
            .submit(&self.values, self.blueprint.sections())
            .await
        {
            Ok(receipt) => {
                info!(id = ?receipt.id, "application submitted");
                self.submitted = true;
                self.values.clear();
                self.errors.clear();
                self.notice = None;
                SubmitOutcome::Delivered(receipt)
            }
            Err(err) => {
                warn!(error = %err, "application submission failed");
                self.notice = Some(SUBMISSION_FAILED_NOTICE.to_string());
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Starts a fresh application after a successful submission.
    pub fn reset(&mut self) {
        self.submitted = false;
        self.current_section = 0;
        self.values.clear();
        self.errors.clear();
        self.notice = None;
    }

    pub fn view(&self) -> FormScreen<'_> {
        if self.submitted {
            FormScreen::Confirmation
        } else {
            FormScreen::Step(StepView::build(
                self.blueprint,
                self.current_section,
                &self.values,
                &self.errors,
            ))
        }
    }

    fn move_to(&mut self, index: usize) -> Navigation {
        let from = self.current_section;
        self.current_section = index;
        Navigation::Moved { from, to: index }
    }
}
