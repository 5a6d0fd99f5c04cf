use std::collections::HashSet;
use std::sync::OnceLock;

use super::domain::{Question, QuestionKind, Section};

/// Ordered, read-only definition of every wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBlueprint {
    sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlueprintError {
    #[error("a form needs at least one section")]
    NoSections,
    #[error("section '{0}' has no questions")]
    EmptySection(String),
    #[error("question id '{0}' is used more than once")]
    DuplicateQuestion(String),
    #[error("select question '{0}' has no options")]
    SelectWithoutOptions(String),
}

impl FormBlueprint {
    pub fn new(sections: Vec<Section>) -> Result<Self, BlueprintError> {
        if sections.is_empty() {
            return Err(BlueprintError::NoSections);
        }

        let mut seen = HashSet::new();
        for section in &sections {
            if section.questions.is_empty() {
                return Err(BlueprintError::EmptySection(section.title.clone()));
            }
            for question in &section.questions {
                if !seen.insert(question.id.as_str()) {
                    return Err(BlueprintError::DuplicateQuestion(question.id.clone()));
                }
                if question.kind == QuestionKind::SingleSelect && question.options.is_empty() {
                    return Err(BlueprintError::SelectWithoutOptions(question.id.clone()));
                }
            }
        }

        Ok(Self { sections })
    }

    /// The fan coach application, built once per process.
    pub fn standard() -> &'static FormBlueprint {
        static STANDARD: OnceLock<FormBlueprint> = OnceLock::new();
        STANDARD.get_or_init(|| FormBlueprint {
            sections: standard_sections(),
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.sections.len().saturating_sub(1)
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
            .find(|question| question.id == question_id)
    }

    pub fn section_index_of(&self, question_id: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.contains(question_id))
    }
}

fn long_answer(id: &str, label: &str) -> Question {
    Question::new(id, label, QuestionKind::MultiLineText).required()
}

fn standard_sections() -> Vec<Section> {
    vec![
        Section::new(
            1,
            "Personal Details",
            vec![
                Question::new("fullName", "Fan Name", QuestionKind::ShortText).required(),
                Question::new("email", "Email address", QuestionKind::Email).required(),
                Question::new("phone", "Phone number", QuestionKind::Phone).required(),
                Question::new(
                    "socialMedia",
                    "Social media handles (X, Facebook, Instagram)",
                    QuestionKind::ShortText,
                ),
                Question::new("sex", "Sex", QuestionKind::SingleSelect)
                    .with_options(&["Select", "Male", "Female", "Prefer not to say"])
                    .required(),
                Question::new("age", "Age", QuestionKind::Number).required(),
                Question::new("maritalStatus", "Marital status", QuestionKind::SingleSelect)
                    .with_options(&[
                        "Select",
                        "Single",
                        "Married",
                        "Divorced",
                        "Widowed",
                        "Prefer not to say",
                    ])
                    .required(),
                long_answer("address", "Home address"),
            ],
        ),
        Section::new(
            2,
            "Fan Engagement Experience",
            vec![
                long_answer(
                    "prevExperience",
                    "Have you previously worked as a fan coach or in a similar role? If yes, please describe your experience.",
                ),
                long_answer(
                    "engagementPlan",
                    "How do you plan to engage with fans and promote team spirit?",
                ),
                long_answer(
                    "socialMediaUse",
                    "What social media platforms do you use to connect with fans, and how do you intend to leverage them for fan coaching?",
                ),
            ],
        ),
        Section::new(
            3,
            "Team Knowledge and Passion",
            vec![
                long_answer(
                    "motivation",
                    "Why do you want to be a fan coach for Willy Adames with the Chicago Giants?",
                ),
                long_answer(
                    "playerKnowledge",
                    "As a potential fan coach, what do you know about Willy Adames' baseball career, statistics, and recent performance with the Chicago Giants?",
                ),
                long_answer(
                    "stayUpdated",
                    "How do you stay updated about the player's activities and developments?",
                ),
            ],
        ),
        Section::new(
            4,
            "Coaching and Leadership Skills",
            vec![
                long_answer(
                    "coachingExperience",
                    "Do you have any experience in coaching or leading groups? If yes, please elaborate.",
                ),
                long_answer(
                    "conflictHandling",
                    "How would you handle conflicts or disagreements among fans?",
                ),
                long_answer(
                    "motivationStrategies",
                    "What strategies would you use to motivate and inspire fans to support Willy Adames during home and away games?",
                ),
            ],
        ),
        Section::new(
            5,
            "Availability and Commitment",
            vec![
                Question::new(
                    "weeklyHours",
                    "How many hours per week can you dedicate to fan coaching?",
                    QuestionKind::Number,
                )
                .required(),
                long_answer(
                    "eventAvailability",
                    "Are you available to attend games, events, or online meetings? If yes, please specify your availability.",
                ),
                long_answer(
                    "commitmentDuration",
                    "How long do you plan to commit to being a fan coach?",
                ),
            ],
        ),
        Section::new(
            6,
            "Additional Information",
            vec![Question::new(
                "additionalInfo",
                "Is there anything else you'd like to share about yourself or your qualifications as a fan coach?",
                QuestionKind::MultiLineText,
            )],
        ),
    ]
}
