use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dmvprep_core::model::{Question, QuestionDifficulty, QuizData, UserAnswers};
use dmvprep_core::scoring::{final_stats, live_stats};

fn make_quiz(n: u32) -> (QuizData, UserAnswers) {
    let quiz = QuizData {
        quiz_title: "Bench".into(),
        total_questions: n,
        questions: (0..n)
            .map(|i| Question {
                question_id: format!("q{i}"),
                difficulty: QuestionDifficulty::Medium,
                question: format!("Question {i}?"),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: "A".into(),
                question_image_url: None,
                option_image_urls: None,
            })
            .collect(),
    };

    let mut answers = UserAnswers::new();
    for i in 0..n {
        // Half right, a quarter wrong, a quarter unanswered.
        if i % 2 == 0 {
            answers.insert(format!("q{i}"), "A".into());
        } else if i % 4 == 1 {
            answers.insert(format!("q{i}"), "B".into());
        }
    }

    (quiz, answers)
}

fn bench_scoring(c: &mut Criterion) {
    let (quiz, answers) = make_quiz(100);

    let mut group = c.benchmark_group("scoring");
    group.bench_function("live_100", |b| {
        b.iter(|| live_stats(black_box(&quiz), black_box(&answers)))
    });
    group.bench_function("final_100", |b| {
        b.iter(|| final_stats(black_box(&quiz), black_box(&answers)))
    });
    group.finish();
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
