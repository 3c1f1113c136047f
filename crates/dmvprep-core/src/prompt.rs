//! Generation prompt builder.
//!
//! Pure composition: a fixed 2025 handbook excerpt, a fixed sign-asset
//! lookup table, and the four config fields produce one instruction string.
//! No network or storage access; identical inputs yield byte-identical
//! output.

use crate::model::{Difficulty, Focus, QuizConfig, Style};

/// Verified stable Wikimedia URLs for California sign assets. The
/// generator is told to use these exact URLs and never invent its own.
pub const SIGN_LIBRARY: [(&str, &str); 15] = [
    (
        "STOP",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/f/f9/STOP_sign.svg/1200px-STOP_sign.svg.png",
    ),
    (
        "YIELD",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/d/d8/Yield_sign.svg/1200px-Yield_sign.svg.png",
    ),
    (
        "SCHOOL_ZONE",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/d/d2/S1-1_School_Sign.svg/1200px-S1-1_School_Sign.svg.png",
    ),
    (
        "NO_U_TURN",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c5/California_R3-4.svg/1200px-California_R3-4.svg.png",
    ),
    (
        "ONE_WAY",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/4/4b/One_Way_sign.svg/1200px-One_Way_sign.svg.png",
    ),
    (
        "SLIPPERY_WHEN_WET",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/1/1d/Slippery_Road_Sign.svg/1200px-Slippery_Road_Sign.svg.png",
    ),
    (
        "PEDESTRIAN_CROSSING",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/0/07/MUTCD_W11-2.svg/1200px-MUTCD_W11-2.svg.png",
    ),
    (
        "DO_NOT_ENTER",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/1/12/Do_Not_Enter.svg/1200px-Do_Not_Enter.svg.png",
    ),
    (
        "DIVIDED_HIGHWAY_ENDS",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/9/91/W6-2_sign.svg/1200px-W6-2_sign.svg.png",
    ),
    (
        "MERGING_TRAFFIC",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a2/MUTCD_W4-1.svg/1200px-MUTCD_W4-1.svg.png",
    ),
    (
        "KEEP_RIGHT",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/b/b3/Keep_Right_sign.svg/1200px-Keep_Right_sign.svg.png",
    ),
    (
        "NO_LEFT_TURN",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e0/No_Left_Turn.svg/1200px-No_Left_Turn.svg.png",
    ),
    (
        "SIGNAL_AHEAD",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/0/05/Signal_Ahead_sign.svg/1200px-Signal_Ahead_sign.svg.png",
    ),
    (
        "RR_CROSSING",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/1/12/Railroad_Crossing_Warning_Sign.svg/1200px-Railroad_Crossing_Warning_Sign.svg.png",
    ),
    (
        "HILL_AHEAD",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/3/30/MUTCD_W7-1.svg/1200px-MUTCD_W7-1.svg.png",
    ),
];

fn sign_library_json() -> String {
    let mut out = String::from("{\n");
    for (i, (name, url)) in SIGN_LIBRARY.iter().enumerate() {
        out.push_str(&format!("  \"{name}\": \"{url}\""));
        if i + 1 < SIGN_LIBRARY.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push('}');
    out
}

/// The fixed reference knowledge embedded in every prompt.
pub fn handbook_highlights() -> String {
    format!(
        r#"CRITICAL KNOWLEDGE FROM CALIFORNIA DRIVER'S HANDBOOK (2025 EDITION):

1. SPEED LIMITS:
   - 25 mph: School zones, Residential, Business districts.
   - 15 mph: Blind intersections, Alleys, Near RR tracks.
   - 65 mph: Max on most highways.
   - 55 mph: Two-lane undivided highways.

2. NUMBERS & DISTANCES:
   - 3 seconds: Following distance.
   - 100 feet: Signal before turn.
   - 200 feet: Distance in center left-turn/bike lane.
   - 18 inches: Max curb distance.
   - 10 days: Notify DMV after accident/move.

3. MINORS & DUI:
   - Under 21: 0.01% BAC Zero Tolerance.
   - Provisional: No driving 11pm-5am first year.
   - DUI: 0.08% for 21+.

4. SIGN LIBRARY (USE THESE EXACT URLS):
{signs}
"#,
        signs = sign_library_json()
    )
}

fn difficulty_instruction(difficulty: Difficulty) -> String {
    if difficulty == Difficulty::Mix {
        return "Vary the difficulty of questions between \"easy\", \"medium\", and \"hard\". \
                IMPORTANT: The \"difficulty\" field in JSON must NOT be \"mix\", it must be \
                one of the specific levels."
            .to_string();
    }
    format!("All questions should be \"{difficulty}\" difficulty.")
}

fn focus_instruction(focus: Focus) -> &'static str {
    match focus {
        Focus::Numeric => {
            "The quiz MUST be \"Math Oriented\". Every question must involve numeric values."
        }
        Focus::Minors => "The quiz MUST focus on \"Students Under 21\".",
        Focus::Dui => "The quiz MUST focus on Alcohol, Drugs, and DUI laws.",
        Focus::Signs => {
            "The quiz MUST focus on Traffic Signs. Use the SIGN LIBRARY URLs for \
             questionImageUrl or optionImageUrls. For \"Which sign means...\" questions, \
             provide 4 different URLs in optionImageUrls."
        }
        Focus::Fines => "The quiz MUST focus on Fines and Penalties.",
        Focus::Mix => "Generate a balanced mix of all handbook topics.",
    }
}

fn style_instruction(style: Style) -> &'static str {
    match style {
        Style::Scenario => "All questions must be \"Scenario-based\".",
        Style::Straightforward => "All questions must be \"Straightforward\" factual questions.",
        Style::Mixed => "Provide a mix of scenario-based and straightforward factual questions.",
    }
}

/// Compose the full instruction string for one generation request.
///
/// Deterministic in `config` and `seen_hashes`; this is a load-bearing
/// property covered by tests.
pub fn build_prompt(config: &QuizConfig, seen_hashes: &[String]) -> String {
    format!(
        r#"You are an expert CA DMV examiner. Generate a JSON quiz.

PARAMETERS:
- Count: {count}
- Difficulty Setting: {difficulty}
- Focus: {focus}
- Style: {style}

UNIQUENESS:
AVOID questions related to these hashes: [{hashes}].

IMAGE RELIABILITY:
- If a question is about a sign, ALWAYS provide a 'questionImageUrl'.
- Use the EXACT URLs from the SIGN LIBRARY provided in Section 4.
- If asking "Identify this sign", provide the URL in questionImageUrl and text answers.
- If asking "Which of these is the YIELD sign", provide text in options and matching URLs in optionImageUrls.

JSON SCHEMA:
{{
  "quizTitle": "CA DMV Practice Test",
  "totalQuestions": {count},
  "questions": [
    {{
      "questionId": "u_1",
      "difficulty": "medium",
      "question": "What does this sign mean?",
      "options": ["Stop", "Yield", "No Entry", "Caution"],
      "correctAnswer": "Yield",
      "questionImageUrl": "https://upload.wikimedia.org/wikipedia/commons/thumb/d/d8/Yield_sign.svg/1200px-Yield_sign.svg.png"
    }}
  ]
}}

{handbook}"#,
        count = config.question_count,
        difficulty = difficulty_instruction(config.difficulty),
        focus = focus_instruction(config.focus),
        style = style_instruction(config.style),
        hashes = seen_hashes.join(", "),
        handbook = handbook_highlights(),
    )
}
