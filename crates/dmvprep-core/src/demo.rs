//! Built-in fallback quiz.

use crate::model::{Question, QuestionDifficulty, QuizData};

/// The fixed quiz served when the remote generator is unavailable, so the
/// whole flow stays usable offline.
pub fn demo_quiz() -> QuizData {
    QuizData {
        quiz_title: "CA DMV Practice Test".to_string(),
        total_questions: 1,
        questions: vec![Question {
            question_id: "demo1".to_string(),
            difficulty: QuestionDifficulty::Medium,
            question: "Which of these signs means Yield?".to_string(),
            options: vec![
                "Triangle".to_string(),
                "Octagon".to_string(),
                "Diamond".to_string(),
                "Rectangle".to_string(),
            ],
            correct_answer: "Triangle".to_string(),
            question_image_url: Some(
                "https://upload.wikimedia.org/wikipedia/commons/thumb/d/d8/Yield_sign.svg/1200px-Yield_sign.svg.png"
                    .to_string(),
            ),
            option_image_urls: None,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_quiz_is_well_formed() {
        let quiz = demo_quiz();
        assert_eq!(quiz.total_questions as usize, quiz.questions.len());
        assert!(quiz.lint().is_empty());
        assert!(quiz.questions[0]
            .options
            .contains(&quiz.questions[0].correct_answer));
    }
}
