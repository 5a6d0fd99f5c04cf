use serde::Serialize;

use super::blueprint::FormBlueprint;
use super::domain::{Question, QuestionKind};
use super::values::{ErrorMap, FormValues};

pub const CONFIRMATION_TITLE: &str = "Application Submitted!";
pub const CONFIRMATION_BODY: &str = "We've received your application and we'll be in touch soon!";
pub const SUBMIT_ANOTHER_LABEL: &str = "Submit Another Application";

/// What the front end should draw right now.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum FormScreen<'a> {
    Step(StepView<'a>),
    Confirmation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    Next,
    Submit,
}

impl PrimaryAction {
    pub const fn label(self) -> &'static str {
        match self {
            PrimaryAction::Next => "Next",
            PrimaryAction::Submit => "Submit Application",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepMarker<'a> {
    pub number: usize,
    pub title: &'a str,
    pub state: StepState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView<'a> {
    pub value: &'a str,
    pub label: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub kind: QuestionKind,
    pub required: bool,
    pub value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceView<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView<'a> {
    pub section_number: usize,
    pub section_title: &'a str,
    pub total_sections: usize,
    pub progress_percent: u8,
    pub steps: Vec<StepMarker<'a>>,
    pub fields: Vec<FieldView<'a>>,
    pub show_previous: bool,
    pub primary_action: PrimaryAction,
}

impl<'a> StepView<'a> {
    pub(crate) fn build(
        blueprint: &'a FormBlueprint,
        current: usize,
        values: &'a FormValues,
        errors: &'a ErrorMap,
    ) -> Self {
        let total_sections = blueprint.len();
        let steps = blueprint
            .sections()
            .iter()
            .enumerate()
            .map(|(index, section)| StepMarker {
                number: index + 1,
                title: section.title.as_str(),
                state: match index.cmp(&current) {
                    std::cmp::Ordering::Less => StepState::Completed,
                    std::cmp::Ordering::Equal => StepState::Active,
                    std::cmp::Ordering::Greater => StepState::Upcoming,
                },
            })
            .collect();

        let (section_title, fields) = match blueprint.section(current) {
            Some(section) => (
                section.title.as_str(),
                section
                    .questions
                    .iter()
                    .map(|question| field_view(question, values, errors))
                    .collect(),
            ),
            None => ("", Vec::new()),
        };

        let progress_percent = if total_sections == 0 {
            0
        } else {
            (current.min(total_sections) * 100 / total_sections) as u8
        };

        let primary_action = if current + 1 >= total_sections {
            PrimaryAction::Submit
        } else {
            PrimaryAction::Next
        };

        Self {
            section_number: current + 1,
            section_title,
            total_sections,
            progress_percent,
            steps,
            fields,
            show_previous: current > 0,
            primary_action,
        }
    }
}

fn field_view<'a>(
    question: &'a Question,
    values: &'a FormValues,
    errors: &'a ErrorMap,
) -> FieldView<'a> {
    let choices = if question.kind == QuestionKind::SingleSelect {
        question
            .options
            .iter()
            .map(|option| ChoiceView {
                value: Question::option_value(option),
                label: option.as_str(),
            })
            .collect()
    } else {
        Vec::new()
    };

    FieldView {
        id: question.id.as_str(),
        label: question.label.as_str(),
        kind: question.kind,
        required: question.required,
        value: values.get(&question.id).unwrap_or_default(),
        error: errors.get(&question.id),
        choices,
    }
}
