//! Wizard behavior exercised through the public controller API: step
//! navigation, per-step and whole-form validation, and the submission hand-off.

use std::sync::Mutex;

use async_trait::async_trait;
use fan_coach::workflows::fan_coach::form::{
    FormBlueprint, FormController, FormScreen, FormValues, Navigation, PrimaryAction, Question,
    QuestionKind, Section, SubmissionReceipt, SubmissionTransport, SubmitOutcome, TransportError,
};

#[derive(Default)]
struct RecordingTransport {
    submissions: Mutex<Vec<(FormValues, Vec<Section>)>>,
}

impl RecordingTransport {
    fn calls(&self) -> usize {
        self.submissions.lock().expect("transport mutex").len()
    }
}

#[async_trait]
impl SubmissionTransport for RecordingTransport {
    async fn submit(
        &self,
        values: &FormValues,
        sections: &[Section],
    ) -> Result<SubmissionReceipt, TransportError> {
        self.submissions
            .lock()
            .expect("transport mutex")
            .push((values.clone(), sections.to_vec()));
        Ok(SubmissionReceipt {
            message: "Email sent successfully".to_string(),
            id: Some("email-42".to_string()),
        })
    }
}

fn two_section_blueprint() -> FormBlueprint {
    FormBlueprint::new(vec![
        Section::new(
            1,
            "One",
            vec![Question::new("a", "A", QuestionKind::ShortText).required()],
        ),
        Section::new(
            2,
            "Two",
            vec![Question::new("b", "B", QuestionKind::ShortText).required()],
        ),
    ])
    .expect("valid blueprint")
}

fn standard_answers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("fullName", "Dana Ortiz"),
        ("email", "dana@example.com"),
        ("phone", "312-555-0142"),
        ("sex", "Female"),
        ("age", "31"),
        ("maritalStatus", "Single"),
        ("address", "1060 W Addison St, Chicago"),
        ("prevExperience", "Ran a supporters' group for five seasons."),
        ("engagementPlan", "Weekly watch parties and chant practice."),
        ("socialMediaUse", "Instagram stories and X threads on game days."),
        ("motivation", "Adames brings energy every inning."),
        ("playerKnowledge", "Power-hitting shortstop with a strong arm."),
        ("stayUpdated", "Box scores, beat writers and the team app."),
        ("coachingExperience", "Coached little league for three years."),
        ("conflictHandling", "Listen first, then redirect to the game."),
        ("motivationStrategies", "Player-specific signs and rally songs."),
        ("weeklyHours", "12"),
        ("eventAvailability", "Home weekends and most away series online."),
        ("commitmentDuration", "At least two seasons."),
    ]
}

#[tokio::test]
async fn submitting_with_missing_field_flags_only_that_field() {
    let blueprint = two_section_blueprint();
    let mut controller = FormController::new(&blueprint);
    controller.on_field_change("a", "x");

    let transport = RecordingTransport::default();
    let outcome = controller.submit_all(&transport).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Invalid {
            first_invalid_section: 1,
            navigation: Navigation::Moved { from: 0, to: 1 },
        }
    ));
    assert_eq!(controller.errors().len(), 1);
    assert_eq!(controller.errors().get("b"), Some("B is required"));
    assert_eq!(controller.current_section_index(), 1);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn lowest_invalid_section_wins() {
    let mut controller = FormController::standard();
    for (id, value) in standard_answers() {
        controller.on_field_change(id, value);
    }
    for _ in 0..5 {
        assert!(matches!(controller.advance(), Navigation::Moved { .. }));
    }
    controller.on_field_change("weeklyHours", "");
    controller.on_field_change("engagementPlan", "");

    let transport = RecordingTransport::default();
    let outcome = controller.submit_all(&transport).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Invalid {
            first_invalid_section: 1,
            ..
        }
    ));
    assert_eq!(controller.current_section_index(), 1);
    assert!(controller.errors().contains("weeklyHours"));
    assert!(controller.errors().contains("engagementPlan"));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn complete_application_walks_every_step_and_submits_once() {
    let mut controller = FormController::standard();
    let transport = RecordingTransport::default();

    for (id, value) in standard_answers() {
        controller.on_field_change(id, value);
    }

    let mut visited = vec![controller.current_section_index()];
    while let Navigation::Moved { to, .. } = controller.advance() {
        visited.push(to);
    }
    assert_eq!(visited, vec![0, 1, 2, 3, 4, 5]);

    match controller.view() {
        FormScreen::Step(view) => assert_eq!(view.primary_action, PrimaryAction::Submit),
        FormScreen::Confirmation => panic!("not yet submitted"),
    }

    let outcome = controller.submit_all(&transport).await;
    assert!(matches!(
        outcome,
        SubmitOutcome::Delivered(ref receipt) if receipt.id.as_deref() == Some("email-42")
    ));
    assert_eq!(transport.calls(), 1);
    assert!(controller.is_submitted());
    assert!(controller.values().is_empty());

    let submissions = transport.submissions.lock().expect("transport mutex");
    let (values, sections) = &submissions[0];
    assert_eq!(values.answer("fullName"), Some("Dana Ortiz"));
    assert_eq!(sections.len(), 6);
}

#[tokio::test]
async fn submit_another_restarts_from_the_first_step() {
    let mut controller = FormController::standard();
    for (id, value) in standard_answers() {
        controller.on_field_change(id, value);
    }
    controller.submit_all(&RecordingTransport::default()).await;
    assert!(controller.is_submitted());

    controller.reset();
    assert!(!controller.is_submitted());
    assert_eq!(controller.current_section_index(), 0);
    assert!(controller.values().is_empty());
    assert_eq!(controller.advance(), Navigation::Blocked);
}
