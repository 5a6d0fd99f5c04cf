use clap::Args;
use fan_coach::error::AppError;
use fan_coach::workflows::fan_coach::form::view::{
    FieldView, CONFIRMATION_BODY, CONFIRMATION_TITLE, SUBMIT_ANOTHER_LABEL,
};
use fan_coach::workflows::fan_coach::form::{
    FormController, FormScreen, HttpSubmissionClient, Navigation, PrimaryAction, StepView,
    SubmissionTransport, SubmitOutcome,
};
use std::io::{self, BufRead, Write};

/// Typing this at any prompt returns to the previous step.
const BACK_COMMAND: &str = "<";
/// Typing this at a prompt erases the stored answer.
const CLEAR_COMMAND: &str = "-";

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Base URL of a running intake service
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub(crate) server: String,
}

pub(crate) async fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let transport = HttpSubmissionClient::new(&args.server);
    let mut controller = FormController::standard();
    let stdin = io::stdin();
    let stdout = io::stdout();

    let submitted = run_wizard(&mut controller, &transport, stdin.lock(), stdout.lock()).await?;
    tracing::info!(submitted, endpoint = transport.endpoint(), "wizard closed");
    Ok(())
}

/// Owned copy of a field prompt so answers can be written while iterating.
struct FieldPrompt {
    id: String,
    label: String,
    required: bool,
    value: String,
    choices: Vec<(String, String)>,
}

impl From<&FieldView<'_>> for FieldPrompt {
    fn from(field: &FieldView<'_>) -> Self {
        Self {
            id: field.id.to_string(),
            label: field.label.to_string(),
            required: field.required,
            value: field.value.to_string(),
            choices: field
                .choices
                .iter()
                .map(|choice| (choice.value.to_string(), choice.label.to_string()))
                .collect(),
        }
    }
}

enum StepInput {
    Completed,
    Back,
    Closed,
}

/// Walks the controller through its steps on a line-oriented terminal.
/// Returns how many applications were delivered before the input closed.
pub(crate) async fn run_wizard<T, R, W>(
    controller: &mut FormController<'_>,
    transport: &T,
    mut input: R,
    mut output: W,
) -> Result<usize, AppError>
where
    T: SubmissionTransport + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut delivered = 0;

    loop {
        let step = match controller.view() {
            FormScreen::Confirmation => None,
            FormScreen::Step(step) => {
                print_step_header(&mut output, &step)?;
                let prompts: Vec<FieldPrompt> = step.fields.iter().map(FieldPrompt::from).collect();
                Some((step.primary_action, prompts))
            }
        };

        let Some((primary_action, prompts)) = step else {
            writeln!(output, "\n{CONFIRMATION_TITLE}\n{CONFIRMATION_BODY}")?;
            write!(output, "{SUBMIT_ANOTHER_LABEL}? [y/N] ")?;
            output.flush()?;
            match read_answer(&mut input)? {
                Some(answer) if answer.eq_ignore_ascii_case("y") => {
                    controller.reset();
                    continue;
                }
                _ => return Ok(delivered),
            }
        };

        match collect_step(controller, &prompts, &mut input, &mut output)? {
            StepInput::Closed => return Ok(delivered),
            StepInput::Back => {
                controller.retreat();
                continue;
            }
            StepInput::Completed => {}
        }

        match primary_action {
            PrimaryAction::Next => {
                if controller.advance() == Navigation::Blocked {
                    writeln!(output, "Please fill in the required fields.")?;
                }
            }
            PrimaryAction::Submit => match controller.submit_all(transport).await {
                SubmitOutcome::Delivered(receipt) => {
                    delivered += 1;
                    writeln!(output, "{}", receipt.message)?;
                }
                SubmitOutcome::Invalid {
                    first_invalid_section,
                    ..
                } => {
                    writeln!(
                        output,
                        "Some required answers are missing; returning to step {}.",
                        first_invalid_section + 1
                    )?;
                }
                SubmitOutcome::Failed(_) => {
                    if let Some(notice) = controller.notice() {
                        writeln!(output, "{notice}")?;
                    }
                    controller.dismiss_notice();
                }
            },
        }
    }
}

fn print_step_header<W: Write>(output: &mut W, step: &StepView<'_>) -> io::Result<()> {
    writeln!(
        output,
        "\nStep {} of {}: {} ({}% complete)",
        step.section_number, step.total_sections, step.section_title, step.progress_percent
    )?;
    if step.show_previous {
        writeln!(
            output,
            "(enter {BACK_COMMAND} to go back, {CLEAR_COMMAND} to clear an answer)"
        )?;
    } else {
        writeln!(output, "(enter {CLEAR_COMMAND} to clear an answer)")?;
    }
    for error in step.fields.iter().filter_map(|field| field.error) {
        writeln!(output, "  ! {error}")?;
    }
    Ok(())
}

fn collect_step<R, W>(
    controller: &mut FormController<'_>,
    prompts: &[FieldPrompt],
    input: &mut R,
    output: &mut W,
) -> Result<StepInput, AppError>
where
    R: BufRead,
    W: Write,
{
    for prompt in prompts {
        for (index, (_, label)) in prompt.choices.iter().enumerate() {
            writeln!(output, "  {}) {label}", index + 1)?;
        }

        loop {
            let marker = if prompt.required { " *" } else { "" };
            if prompt.value.is_empty() {
                write!(output, "{}{marker}: ", prompt.label)?;
            } else {
                write!(output, "{}{marker} [{}]: ", prompt.label, prompt.value)?;
            }
            output.flush()?;

            let Some(answer) = read_answer(input)? else {
                return Ok(StepInput::Closed);
            };
            if answer == BACK_COMMAND {
                return Ok(StepInput::Back);
            }
            if answer.is_empty() {
                break;
            }
            if answer == CLEAR_COMMAND {
                controller.on_field_change(&prompt.id, String::new());
                break;
            }

            if prompt.choices.is_empty() {
                controller.on_field_change(&prompt.id, answer);
                break;
            }
            match pick_choice(&prompt.choices, &answer) {
                Some(value) => {
                    controller.on_field_change(&prompt.id, value);
                    break;
                }
                None => writeln!(
                    output,
                    "  choose a number between 1 and {}",
                    prompt.choices.len()
                )?,
            }
        }
    }

    Ok(StepInput::Completed)
}

/// Accepts either the option number or its label.
fn pick_choice(choices: &[(String, String)], answer: &str) -> Option<String> {
    if let Ok(number) = answer.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| choices.get(index))
            .map(|(value, _)| value.clone());
    }
    choices
        .iter()
        .find(|(_, label)| label.eq_ignore_ascii_case(answer))
        .map(|(value, _)| value.clone())
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
