//! The `dmvprep play` command — the interactive exam flow.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use comfy_table::Table;

use dmvprep_core::history::{FileStore, HistoryStore};
use dmvprep_core::model::{Question, QuizConfig, QuizData, UserAnswers};
use dmvprep_core::scoring::{self, PASS_THRESHOLD};
use dmvprep_core::session::{self, Phase, Session};
use dmvprep_core::traits::{KeyBridge, NoopKeyBridge, QuizGenerator};
use dmvprep_providers::GeminiGenerator;

pub async fn execute(
    difficulty: String,
    style: String,
    focus: String,
    count: u32,
    demo: bool,
    model: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = super::parse_config(&difficulty, &style, &focus, count)?;
    let history = HistoryStore::new(super::open_store(data_dir)?);

    let mut generator = GeminiGenerator::new(None);
    if let Some(m) = &model {
        generator = generator.with_model(m);
    }
    let bridge = NoopKeyBridge;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut session = Session::new();
    if demo {
        session.load_demo();
    } else {
        start_quiz(&mut session, &generator, &config, &history).await;
    }

    loop {
        match session.phase() {
            Phase::Quiz => {
                let Some(quiz) = session.quiz().cloned() else {
                    break;
                };
                run_quiz(&mut session, &quiz, &mut input)?;
            }
            Phase::Results => {
                let Some(quiz) = session.quiz().cloned() else {
                    break;
                };
                show_results(&quiz, session.answers());
                history.record_seen(&quiz.questions);

                if !demo && prompt_yes_no(&mut input, "Try another version? [y/N] ")? {
                    session.retry();
                    start_quiz(&mut session, &generator, &config, &history).await;
                } else {
                    break;
                }
            }
            Phase::Error => {
                let message = session.error().unwrap_or_default().to_string();
                println!();
                println!("Generation failed: {message}");
                if session::is_auth_message(&message)
                    && bridge.has_selected_key().await
                    && prompt_yes_no(&mut input, "Re-select your API key? [y/N] ")?
                {
                    bridge.open_select_key().await;
                    session.back_to_welcome();
                    break;
                }
                if prompt_yes_no(&mut input, "Run the demo quiz instead? [y/N] ")? {
                    session.load_demo();
                } else {
                    break;
                }
            }
            Phase::Welcome | Phase::Loading => break,
        }
    }

    Ok(())
}

async fn start_quiz(
    session: &mut Session,
    generator: &impl QuizGenerator,
    config: &QuizConfig,
    history: &HistoryStore<FileStore>,
) {
    let Some(token) = session.begin_loading() else {
        return;
    };
    println!(
        "Generating your {}-question exam ({} seen questions excluded)...",
        config.question_count,
        history.seen_count()
    );
    let seen = history.seen_hashes();
    tracing::debug!(seen = seen.len(), "requesting quiz from {}", generator.name());
    let outcome = generator.generate(config, &seen).await;
    session.finish_loading(token, outcome);
}

fn run_quiz(session: &mut Session, quiz: &QuizData, input: &mut impl BufRead) -> Result<()> {
    let started = Instant::now();
    println!();
    println!("=== {} ===", quiz.quiz_title);

    for (index, question) in quiz.questions.iter().enumerate() {
        print_question(question, index, quiz.total_questions);
        let Some(choice) = read_choice(input, &question.options)? else {
            break; // stdin closed; score what we have
        };
        session.answer(&question.question_id, &choice);
        print_feedback(session, quiz, question, &choice);
    }

    println!();
    println!("Completed in {}.", format_elapsed(started.elapsed()));
    let answers = session.answers().clone();
    session.complete(answers);
    Ok(())
}

fn print_question(question: &Question, index: usize, total: u32) {
    println!();
    println!("Question {} / {} [{}]", index + 1, total, question.difficulty);
    println!("{}", question.question);
    if let Some(url) = &question.question_image_url {
        println!("(sign image: {url})");
    }
    for (i, option) in question.options.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;
        match question
            .option_image_urls
            .as_ref()
            .and_then(|urls| urls.get(i))
        {
            Some(url) => println!("  {letter}. {option} ({url})"),
            None => println!("  {letter}. {option}"),
        }
    }
}

/// Read a letter choice; `None` when stdin is exhausted.
fn read_choice(input: &mut impl BufRead, options: &[String]) -> Result<Option<String>> {
    loop {
        print!("Your answer: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut chars = trimmed.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            let index = (letter.to_ascii_uppercase() as i32) - ('A' as i32);
            if (0..options.len() as i32).contains(&index) {
                return Ok(Some(options[index as usize].clone()));
            }
        }
        let last = (b'A' + options.len().saturating_sub(1) as u8) as char;
        println!("Please answer with a letter between A and {last}.");
    }
}

fn print_feedback(session: &Session, quiz: &QuizData, question: &Question, choice: &str) {
    if choice == question.correct_answer {
        println!("PERFECT! You truly know the handbook.");
    } else {
        println!("WRONG! The correct answer is: {}", question.correct_answer);
    }
    let live = scoring::live_stats(quiz, session.answers());
    println!(
        "Running accuracy: {}% ({} right, {} wrong)",
        live.percentage, live.correct, live.incorrect
    );
}

fn show_results(quiz: &QuizData, answers: &UserAnswers) {
    let stats = scoring::final_stats(quiz, answers);

    println!();
    if stats.passed {
        println!("EXAM PASSED!");
    } else {
        println!("EXAM FAILED");
    }
    println!("{}% score. Passing is {}%.", stats.score, PASS_THRESHOLD);

    let mut table = Table::new();
    table.set_header(vec!["Correct", "Wrong", "Unanswered", "Score"]);
    table.add_row(vec![
        stats.correct.to_string(),
        stats.incorrect.to_string(),
        stats.unanswered.to_string(),
        format!("{}%", stats.score),
    ]);
    println!("{table}");

    println!();
    println!("Review:");
    for (index, question) in quiz.questions.iter().enumerate() {
        let user_answer = answers.get(&question.question_id);
        let mark = match user_answer {
            Some(a) if *a == question.correct_answer => "+",
            Some(_) => "x",
            None => "-",
        };
        println!("  {mark} Q{}: {}", index + 1, question.question);
        match user_answer {
            Some(a) if *a != question.correct_answer => println!(
                "      you answered '{a}', correct is '{}'",
                question.correct_answer
            ),
            None => println!("      unanswered, correct is '{}'", question.correct_answer),
            _ => {}
        }
    }
}

fn prompt_yes_no(input: &mut impl BufRead, message: &str) -> Result<bool> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
