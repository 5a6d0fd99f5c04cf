use clap::Args;
use fan_coach::error::AppError;
use fan_coach::workflows::fan_coach::form::{validate_form, FormBlueprint, FormValues};
use fan_coach::workflows::fan_coach::submission::{render_summary_html, subject_line};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// JSON object mapping question ids to answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Also list required questions that are still unanswered
    #[arg(long)]
    pub(crate) check: bool,
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.answers)?;
    let values: FormValues = serde_json::from_str(&raw)?;

    let stdout = io::stdout();
    write_preview(&values, args.check, &mut stdout.lock())
}

fn write_preview<W: Write>(values: &FormValues, check: bool, output: &mut W) -> Result<(), AppError> {
    let blueprint = FormBlueprint::standard();

    if check {
        let validation = validate_form(blueprint, values);
        if validation.is_valid() {
            writeln!(output, "All required questions are answered.")?;
        } else {
            writeln!(output, "Missing required answers:")?;
            for section in blueprint.sections() {
                for question in &section.questions {
                    if let Some(message) = validation.errors.get(&question.id) {
                        writeln!(output, "  - {} ({message})", section.title)?;
                    }
                }
            }
        }
        writeln!(output)?;
    }

    writeln!(output, "Subject: {}", subject_line(values))?;
    writeln!(output)?;
    writeln!(output, "{}", render_summary_html(values, blueprint.sections()))?;
    Ok(())
}
