//! Scoring of a finished attempt.
//!
//! One mark per correct answer, no negative marking. Unanswered questions
//! and questions whose canonical answer is missing from their options are
//! counted as wrong.

use std::collections::BTreeMap;

use crate::model::{Aggregate, Question, ResultRecord};

/// Per-question results plus the aggregate they add up to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredAttempt {
    pub results: Vec<ResultRecord>,
    pub aggregate: Aggregate,
}

/// Score `answers` (keyed by question index) against `questions`.
pub fn score_answers(questions: &[Question], answers: &BTreeMap<usize, String>) -> ScoredAttempt {
    let results: Vec<ResultRecord> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let user_answer = answers.get(&index).cloned();
            let is_correct = question.is_scorable()
                && user_answer.as_deref() == Some(question.correct_answer.as_str());
            ResultRecord {
                question_id: question.id.clone(),
                user_answer,
                correct_answer: question.correct_answer.clone(),
                is_correct,
            }
        })
        .collect();

    let aggregate = aggregate(&results);
    ScoredAttempt { results, aggregate }
}

/// Tally a result list.
pub fn aggregate(results: &[ResultRecord]) -> Aggregate {
    let correct_count = results.iter().filter(|r| r.is_correct).count();
    Aggregate {
        correct_count,
        wrong_count: results.len() - correct_count,
        total_marks: correct_count,
    }
}
