//! Client-side wizard state: the static form definition, answer bookkeeping,
//! required-field validation and the hand-off to the submission endpoint.

mod blueprint;
mod controller;
pub mod domain;
pub mod transport;
mod validation;
mod values;
pub mod view;

pub use blueprint::{BlueprintError, FormBlueprint};
pub use controller::{FormController, Navigation, SubmitOutcome, SUBMISSION_FAILED_NOTICE};
pub use domain::{Question, QuestionKind, Section, SELECT_PLACEHOLDER};
pub use transport::{
    HttpSubmissionClient, SubmissionReceipt, SubmissionTransport, TransportError,
};
pub use validation::{section_errors, validate_form, FormValidation};
pub use values::{ErrorMap, FormValues};
pub use view::{FormScreen, PrimaryAction, StepState, StepView};
