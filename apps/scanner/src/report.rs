//! Plain-text rendering of scan results for the terminal.

use std::fmt::Write;

use crate::models::{BatchResult, Document, ScoreResult};
use crate::scoring::{bar_width_percent, color_for, grade_for, humanize_key};

const BAR_CELLS: usize = 20;

/// Renders one result card: header with grade and score, breakdown bars, and
/// (optionally) the per-dimension explanations.
pub fn render_result(result: &ScoreResult, with_details: bool) -> String {
    let mut out = String::new();
    let filename = result.filename.as_deref().unwrap_or("<unnamed>");

    if let Some(error) = result.error_message() {
        let _ = writeln!(out, "{filename}");
        let _ = writeln!(out, "  Error: {error}");
        return out;
    }

    let score = result.final_score.unwrap_or(0.0);
    let _ = writeln!(
        out,
        "{filename}  [{grade}] {score}/10 ({tier})",
        grade = grade_for(score),
        tier = color_for(score).as_str()
    );

    if !result.breakdown.is_empty() {
        let _ = writeln!(out, "  Score Breakdown");
        let width = result
            .breakdown
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        for (key, value) in &result.breakdown {
            let _ = writeln!(
                out,
                "    {label:<width$}  {bar}  {value}",
                label = humanize_key(key),
                bar = render_bar(*value),
            );
        }
    }

    if with_details && !result.details.is_empty() {
        let _ = writeln!(out, "  Detailed Analysis");
        for (key, detail) in &result.details {
            let _ = writeln!(out, "    {}: {}", humanize_key(key), detail.explanation);
        }
    }

    out
}

pub fn render_batch(batch: &BatchResult, with_details: bool) -> String {
    if let Some(error) = batch.error_message() {
        return format!("Error: {error}\n");
    }

    let mut out = format!(
        "Scan Results: {} scanned, {} ok, {} failed\n",
        batch.results.len(),
        batch.succeeded(),
        batch.failed()
    );
    for result in &batch.results {
        out.push('\n');
        out.push_str(&render_result(result, with_details));
    }
    out
}

pub fn render_documents(documents: &[Document], selected: impl Fn(&str) -> bool) -> String {
    if documents.is_empty() {
        return "No resumes found in this folder\n".to_string();
    }
    let mut out = String::new();
    for doc in documents {
        let mark = if selected(&doc.storage_path) { 'x' } else { ' ' };
        let _ = writeln!(out, "[{mark}] {}  ({})", doc.name, doc.storage_path);
    }
    out
}

fn render_bar(value: f64) -> String {
    let filled = (bar_width_percent(value) / 100.0 * BAR_CELLS as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ScoreResult {
        serde_json::from_value(json!({
            "success": true,
            "filename": "a.pdf",
            "final_score": 7.5,
            "breakdown": {"skills_match": 8, "culture_fit": 5},
            "details": {"skills_match": {"explanation": "strong match"}}
        }))
        .unwrap()
    }

    #[test]
    fn test_render_success_header() {
        let text = render_result(&sample(), false);
        assert!(text.starts_with("a.pdf  [B+] 7.5/10 (warning)"), "{text}");
        assert!(text.contains("skills match"));
        assert!(!text.contains("strong match"));
    }

    #[test]
    fn test_render_details_when_requested() {
        let text = render_result(&sample(), true);
        assert!(text.contains("skills match: strong match"));
    }

    #[test]
    fn test_render_failure_card() {
        let result = ScoreResult {
            filename: Some("b.pdf".into()),
            ..ScoreResult::failure("corrupt file")
        };
        assert_eq!(render_result(&result, true), "b.pdf\n  Error: corrupt file\n");
    }

    #[test]
    fn test_render_bar_proportions() {
        assert_eq!(render_bar(10.0), "#".repeat(20));
        assert_eq!(render_bar(5.0), format!("{}{}", "#".repeat(10), ".".repeat(10)));
        assert_eq!(render_bar(-1.0), ".".repeat(20));
    }

    #[test]
    fn test_render_batch_summary_and_items() {
        let batch = BatchResult {
            success: true,
            results: vec![sample(), ScoreResult::failure("corrupt file")],
            ..Default::default()
        };
        let text = render_batch(&batch, false);
        assert!(text.starts_with("Scan Results: 2 scanned, 1 ok, 1 failed"));
        assert!(text.contains("Error: corrupt file"));
    }

    #[test]
    fn test_render_batch_failure() {
        assert_eq!(
            render_batch(&BatchResult::failure("No resumes selected"), false),
            "Error: No resumes selected\n"
        );
    }

    #[test]
    fn test_render_documents_marks_selection() {
        let docs = vec![Document {
            name: "a.pdf".into(),
            storage_path: "2024-05-01/a.pdf".into(),
            created_at: None,
            size: None,
        }];
        let text = render_documents(&docs, |p| p == "2024-05-01/a.pdf");
        assert_eq!(text, "[x] a.pdf  (2024-05-01/a.pdf)\n");
        assert_eq!(
            render_documents(&[], |_| false),
            "No resumes found in this folder\n"
        );
    }
}
