use std::borrow::Cow;

use crate::workflows::fan_coach::form::{FormValues, Section};

pub const EMAIL_HEADING: &str = "New Fan Coach Application Submission";
pub const NOT_PROVIDED: &str = "Not provided";
pub const APPLICANT_NAME_FIELD: &str = "fullName";
pub const FALLBACK_APPLICANT_NAME: &str = "Applicant";

/// Subject line naming the applicant when a name was given.
pub fn subject_line(values: &FormValues) -> String {
    let name = values
        .answer(APPLICANT_NAME_FIELD)
        .unwrap_or(FALLBACK_APPLICANT_NAME);
    format!("New Fan Coach Application from {name}")
}

/// Renders every section and answer, in form order, as one HTML document.
pub fn render_summary_html(values: &FormValues, sections: &[Section]) -> String {
    let mut html = String::new();
    html.push_str(&format!("<h1>{EMAIL_HEADING}</h1>"));

    for section in sections {
        html.push_str(&format!("<h2>{}</h2><ul>", escape_html(&section.title)));
        for question in &section.questions {
            let answer = values.answer(&question.id).unwrap_or(NOT_PROVIDED);
            html.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>",
                escape_html(&question.label),
                escape_html(answer)
            ));
        }
        html.push_str("</ul>");
    }

    html
}

pub(crate) fn escape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::fan_coach::form::{Question, QuestionKind};

    fn sections() -> Vec<Section> {
        vec![
            Section::new(
                1,
                "Personal Details",
                vec![
                    Question::new("fullName", "Fan Name", QuestionKind::ShortText).required(),
                    Question::new("socialMedia", "Social media", QuestionKind::ShortText),
                ],
            ),
            Section::new(
                2,
                "Availability",
                vec![Question::new("weeklyHours", "Hours", QuestionKind::Number).required()],
            ),
        ]
    }

    #[test]
    fn renders_sections_in_order_with_placeholders() {
        let values: FormValues = [("fullName", "Dana Ortiz"), ("weeklyHours", "")]
            .into_iter()
            .collect();
        let html = render_summary_html(&values, &sections());
        assert_eq!(
            html,
            "<h1>New Fan Coach Application Submission</h1>\
             <h2>Personal Details</h2><ul>\
             <li><strong>Fan Name:</strong> Dana Ortiz</li>\
             <li><strong>Social media:</strong> Not provided</li></ul>\
             <h2>Availability</h2><ul>\
             <li><strong>Hours:</strong> Not provided</li></ul>"
        );
    }

    #[test]
    fn answers_are_escaped() {
        let values: FormValues = [("fullName", "<b>Dana</b> & co")].into_iter().collect();
        let html = render_summary_html(&values, &sections());
        assert!(html.contains("&lt;b&gt;Dana&lt;/b&gt; &amp; co"));
        assert!(!html.contains("<b>Dana"));
    }

    #[test]
    fn labels_with_apostrophes_are_escaped() {
        assert_eq!(escape_html("Willy Adames' career"), "Willy Adames&#39; career");
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn subject_falls_back_to_applicant() {
        assert_eq!(
            subject_line(&FormValues::new()),
            "New Fan Coach Application from Applicant"
        );
        let values: FormValues = [("fullName", "Dana Ortiz")].into_iter().collect();
        assert_eq!(
            subject_line(&values),
            "New Fan Coach Application from Dana Ortiz"
        );
    }
}
