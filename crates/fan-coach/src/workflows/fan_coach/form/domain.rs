use serde::{Deserialize, Serialize};

/// Option text shown at the top of every select that maps to "no answer".
pub const SELECT_PLACEHOLDER: &str = "Select";

/// Input kind for a question. Serialized names match the HTML input types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "text")]
    ShortText,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "tel")]
    Phone,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "textarea")]
    MultiLineText,
    #[serde(rename = "select")]
    SingleSelect,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionKind::ShortText => "text",
            QuestionKind::Email => "email",
            QuestionKind::Phone => "tel",
            QuestionKind::Number => "number",
            QuestionKind::MultiLineText => "textarea",
            QuestionKind::SingleSelect => "select",
        }
    }

    pub const fn is_multiline(self) -> bool {
        matches!(self, QuestionKind::MultiLineText)
    }
}

/// A single field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Question {
    pub fn new(id: &str, label: &str, kind: QuestionKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|option| option.to_string()).collect();
        self
    }

    /// Value stored for a chosen option; the placeholder stores nothing.
    pub fn option_value(option: &str) -> &str {
        if option == SELECT_PLACEHOLDER {
            ""
        } else {
            option
        }
    }

    /// Normalizes raw input before it lands in the form values.
    pub fn normalize_input(&self, value: String) -> String {
        if self.kind == QuestionKind::SingleSelect && value == SELECT_PLACEHOLDER {
            String::new()
        } else {
            value
        }
    }

    pub fn required_message(&self) -> String {
        format!("{} is required", self.label)
    }
}

/// A titled group of questions shown together as one wizard step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u32,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Section {
    pub fn new(id: u32, title: &str, questions: Vec<Question>) -> Self {
        Self {
            id,
            title: title.to_string(),
            questions,
        }
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.questions
            .iter()
            .any(|question| question.id == question_id)
    }

    pub fn required_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|question| question.required)
    }
}
