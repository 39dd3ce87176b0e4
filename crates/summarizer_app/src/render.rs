use summarizer_core::{ErrorCategory, LifecycleState, ResultData};

pub fn render(state: &LifecycleState) -> String {
    match state {
        LifecycleState::Idle => "Nothing submitted.".to_string(),
        LifecycleState::Validating { .. } => "Checking file...".to_string(),
        LifecycleState::Submitting { deadline, started_at, .. } => format!(
            "Generating summary (gives up after {}s)...",
            deadline.saturating_duration_since(*started_at).as_secs()
        ),
        LifecycleState::Succeeded(data) => render_result(data),
        LifecycleState::Failed { category, message } => {
            format!("Error [{}]: {}", category_label(*category), message)
        }
    }
}

fn render_result(data: &ResultData) -> String {
    format!(
        "Title: {}\nTitle score: {}\n\nSummary:\n{}\nSummary score: {}",
        data.title,
        format_score(data.title_score),
        data.summary,
        format_score(data.summary_score)
    )
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

fn category_label(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Validation(_) => "invalid file",
        ErrorCategory::Timeout => "timeout",
        ErrorCategory::Connectivity => "connection",
        ErrorCategory::ServerReported => "server",
        ErrorCategory::Cancelled => "cancelled",
        ErrorCategory::Unexpected => "unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use summarizer_core::ValidationFailure;

    #[test]
    fn scores_are_percentages_with_one_decimal() {
        assert_eq!(format_score(0.9), "90.0%");
        assert_eq!(format_score(0.8567), "85.7%");
        assert_eq!(format_score(0.0), "0.0%");
        assert_eq!(format_score(1.0), "100.0%");
    }

    #[test]
    fn result_lists_title_summary_and_scores() {
        let text = render(&LifecycleState::Succeeded(ResultData {
            title: "T".to_string(),
            summary: "S".to_string(),
            title_score: 0.9,
            summary_score: 0.85,
        }));
        assert_eq!(
            text,
            "Title: T\nTitle score: 90.0%\n\nSummary:\nS\nSummary score: 85.0%"
        );
    }

    #[test]
    fn failure_shows_category_and_message() {
        let text = render(&LifecycleState::Failed {
            category: ErrorCategory::Validation(ValidationFailure::Empty),
            message: "File appears to be empty. Please select a valid file.".to_string(),
        });
        assert_eq!(
            text,
            "Error [invalid file]: File appears to be empty. Please select a valid file."
        );
    }
}
