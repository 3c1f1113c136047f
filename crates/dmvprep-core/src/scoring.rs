//! Quiz scoring.
//!
//! Pure recomputation over the answer map, O(number of questions); cheap
//! enough to run after every answer.

use crate::model::{QuizData, UserAnswers};

/// Passing threshold in percent, mirroring the real exam's standard.
pub const PASS_THRESHOLD: u32 = 83;

/// Running statistics while a quiz is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveStats {
    pub correct: u32,
    pub incorrect: u32,
    /// Accuracy over attempted questions; 100 before anything is answered.
    pub percentage: u32,
}

/// Final statistics for a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalStats {
    pub correct: u32,
    pub incorrect: u32,
    pub unanswered: u32,
    /// Percentage of the declared question count answered correctly.
    pub score: u32,
    pub passed: bool,
}

fn tally(quiz: &QuizData, answers: &UserAnswers) -> (u32, u32, u32) {
    let mut correct = 0;
    let mut incorrect = 0;
    let mut unanswered = 0;
    for q in &quiz.questions {
        match answers.get(&q.question_id) {
            Some(answer) if *answer == q.correct_answer => correct += 1,
            Some(_) => incorrect += 1,
            None => unanswered += 1,
        }
    }
    (correct, incorrect, unanswered)
}

fn round_pct(numerator: u32, denominator: u32) -> u32 {
    (f64::from(numerator) * 100.0 / f64::from(denominator)).round() as u32
}

/// Accuracy so far. The unattempted state counts as perfect, which also
/// keeps the division defined.
pub fn live_stats(quiz: &QuizData, answers: &UserAnswers) -> LiveStats {
    let (correct, incorrect, _) = tally(quiz, answers);
    let attempted = correct + incorrect;
    let percentage = if attempted == 0 {
        100
    } else {
        round_pct(correct, attempted)
    };
    LiveStats {
        correct,
        incorrect,
        percentage,
    }
}

/// Final score against the declared question count and the fixed passing
/// threshold.
pub fn final_stats(quiz: &QuizData, answers: &UserAnswers) -> FinalStats {
    let (correct, incorrect, unanswered) = tally(quiz, answers);
    let score = if quiz.total_questions == 0 {
        0
    } else {
        round_pct(correct, quiz.total_questions)
    };
    FinalStats {
        correct,
        incorrect,
        unanswered,
        score,
        passed: score >= PASS_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionDifficulty};

    fn quiz(total: u32) -> QuizData {
        QuizData {
            quiz_title: "Scoring".into(),
            total_questions: total,
            questions: (0..total)
                .map(|i| Question {
                    question_id: format!("q{i}"),
                    difficulty: QuestionDifficulty::Easy,
                    question: format!("Question {i}?"),
                    options: vec!["A".into(), "B".into(), "C".into()],
                    correct_answer: "A".into(),
                    question_image_url: None,
                    option_image_urls: None,
                })
                .collect(),
        }
    }

    fn answers(correct: u32, incorrect: u32) -> UserAnswers {
        let mut map = UserAnswers::new();
        for i in 0..correct {
            map.insert(format!("q{i}"), "A".into());
        }
        for i in correct..correct + incorrect {
            map.insert(format!("q{i}"), "B".into());
        }
        map
    }

    #[test]
    fn final_stats_counts_and_score() {
        let stats = final_stats(&quiz(10), &answers(6, 3));
        assert_eq!(stats.correct, 6);
        assert_eq!(stats.incorrect, 3);
        assert_eq!(stats.unanswered, 1);
        assert_eq!(stats.score, 60);
        assert!(!stats.passed);
    }

    #[test]
    fn pass_boundary_is_exactly_83() {
        assert!(final_stats(&quiz(100), &answers(83, 0)).passed);
        assert!(!final_stats(&quiz(100), &answers(82, 0)).passed);
    }

    #[test]
    fn live_percentage_is_100_before_any_answer() {
        let stats = live_stats(&quiz(10), &UserAnswers::new());
        assert_eq!(stats.correct, 0);
        assert_eq!(stats.incorrect, 0);
        assert_eq!(stats.percentage, 100);
    }

    #[test]
    fn live_percentage_ignores_unanswered_questions() {
        let stats = live_stats(&quiz(10), &answers(1, 2));
        assert_eq!(stats.percentage, 33);

        let stats = live_stats(&quiz(10), &answers(2, 1));
        assert_eq!(stats.percentage, 67);
    }

    #[test]
    fn score_rounds_to_nearest_percent() {
        // 2/3 of the declared count -> 66.67 -> 67
        let stats = final_stats(&quiz(3), &answers(2, 0));
        assert_eq!(stats.score, 67);
    }

    #[test]
    fn empty_quiz_scores_zero() {
        let stats = final_stats(&quiz(0), &UserAnswers::new());
        assert_eq!(stats.score, 0);
        assert!(!stats.passed);
    }

    #[test]
    fn answers_for_unknown_ids_are_ignored() {
        let mut map = answers(1, 0);
        map.insert("ghost".into(), "A".into());
        let stats = final_stats(&quiz(2), &map);
        assert_eq!(stats.correct, 1);
        assert_eq!(stats.unanswered, 1);
    }
}
