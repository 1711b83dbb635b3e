//! Answer recording and attempt scoring

use crate::question::Question;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selected option values per question index
///
/// Selections are add-only: there is no way to take a value back once recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAnswers {
    selections: BTreeMap<usize, Vec<String>>,
}

impl UserAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for a question, returns false if it was already selected
    pub fn record(&mut self, index: usize, value: &str) -> bool {
        let selected = self.selections.entry(index).or_default();
        if selected.iter().any(|v| v == value) {
            return false;
        }
        selected.push(value.to_string());
        true
    }

    pub fn get(&self, index: usize) -> &[String] {
        self.selections.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_selected(&self, index: usize, value: &str) -> bool {
        self.get(index).iter().any(|v| v == value)
    }

    /// Number of questions with at least one selection
    pub fn answered(&self) -> usize {
        self.selections.values().filter(|v| !v.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.answered() == 0
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Wrong,
    Skipped,
}

/// Grade one question. Correct means the correct option's value is among the
/// selections; extra selections alongside it are not penalised.
pub fn grade(question: &Question, selected: &[String]) -> Outcome {
    if selected.is_empty() {
        return Outcome::Skipped;
    }
    match question.correct_value() {
        Some(correct) if selected.iter().any(|v| v == correct) => Outcome::Correct,
        _ => Outcome::Wrong,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    pub score: u32,
    pub correct: usize,
    pub wrong: usize,
    pub skipped: usize,
    pub time_taken: String,
}

impl Results {
    pub fn total(&self) -> usize {
        self.correct + self.wrong + self.skipped
    }
}

/// Score every question in the sequence, visited or not
pub fn score_attempt(
    questions: &[Question],
    answers: &UserAnswers,
    elapsed_secs: u32,
    points_per_correct: u32,
) -> Results {
    let (mut correct, mut wrong, mut skipped) = (0, 0, 0);
    for (index, question) in questions.iter().enumerate() {
        match grade(question, answers.get(index)) {
            Outcome::Correct => correct += 1,
            Outcome::Wrong => wrong += 1,
            Outcome::Skipped => skipped += 1,
        }
    }

    Results {
        score: (correct as u32).saturating_mul(points_per_correct),
        correct,
        wrong,
        skipped,
        time_taken: format_time(elapsed_secs),
    }
}

/// Format seconds as zero-padded MM:SS
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuizOption;

    fn question(correct: u32) -> Question {
        Question::new(
            "Pick one",
            vec![
                QuizOption::new(1, "alpha"),
                QuizOption::new(2, "beta"),
                QuizOption::new(3, "gamma"),
            ],
            correct,
        )
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(300), "05:00");
        assert_eq!(format_time(599), "09:59");
    }

    #[test]
    fn test_record_is_add_only() {
        let mut answers = UserAnswers::new();
        assert!(answers.record(0, "alpha"));
        assert!(answers.record(0, "beta"));
        assert!(!answers.record(0, "alpha"));
        assert_eq!(answers.get(0), ["alpha", "beta"]);
        assert!(answers.get(1).is_empty());
        assert_eq!(answers.answered(), 1);
    }

    #[test]
    fn test_grade() {
        let q = question(2);
        assert_eq!(grade(&q, &[]), Outcome::Skipped);
        assert_eq!(grade(&q, &["beta".to_string()]), Outcome::Correct);
        assert_eq!(grade(&q, &["alpha".to_string()]), Outcome::Wrong);
        // Membership, not exact set match
        assert_eq!(
            grade(&q, &["alpha".to_string(), "beta".to_string()]),
            Outcome::Correct
        );
    }

    #[test]
    fn test_unresolved_correct_option_is_wrong_not_skipped() {
        let q = question(42);
        assert_eq!(grade(&q, &["alpha".to_string()]), Outcome::Wrong);
        assert_eq!(grade(&q, &[]), Outcome::Skipped);
    }

    #[test]
    fn test_score_attempt_counts_every_question() {
        let questions = vec![question(1), question(2), question(3), question(1)];
        let mut answers = UserAnswers::new();
        answers.record(0, "alpha");
        answers.record(1, "gamma");
        answers.record(3, "alpha");

        let results = score_attempt(&questions, &answers, 125, 10);
        assert_eq!(results.correct, 2);
        assert_eq!(results.wrong, 1);
        assert_eq!(results.skipped, 1);
        assert_eq!(results.score, 20);
        assert_eq!(results.total(), questions.len());
        assert_eq!(results.time_taken, "02:05");
    }

    #[test]
    fn test_results_json_shape() {
        let results = score_attempt(&[question(1)], &UserAnswers::new(), 5, 10);
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["timeTaken"], "00:05");
        assert_eq!(json["skipped"], 1);
        assert_eq!(json["score"], 0);
    }
}
