use lexquiz_core::types::{Question, Quiz};

use crate::strings;

fn question(id: i64, text: &str, options: &[&str], correct_answer: usize) -> Question {
    Question {
        id,
        question: text.into(),
        options: strings(options),
        correct_answer,
    }
}

/// All built-in quizzes.
pub fn quiz_bank() -> Vec<Quiz> {
    vec![basic_law_quiz()]
}

fn basic_law_quiz() -> Quiz {
    Quiz {
        id: 1,
        title: "Basic Law Quiz".into(),
        questions: vec![
            question(1, "What year was the U.S. Constitution ratified?", &["1776", "1787", "1791", "1795"], 1),
            question(2, "How many amendments are in the Bill of Rights?", &["5", "8", "10", "15"], 2),
            question(
                3,
                "Which branch has the power to interpret laws?",
                &["Legislative", "Executive", "Judicial", "Administrative"],
                2,
            ),
            question(
                4,
                "Who gave the definition \"law is the command of the sovereign backed by sanction\"?",
                &["H.L.A. Hart", "John Austin", "Lon Fuller", "Ronald Dworkin"],
                1,
            ),
            question(
                5,
                "Who put forward the idea of a Constituent Assembly for India?",
                &["M.N. Roy", "Jawaharlal Nehru", "B.R. Ambedkar", "Sardar Patel"],
                0,
            ),
            question(
                6,
                "Which amendment is known as the \"Mini Constitution\"?",
                &["42nd Amendment", "44th Amendment", "52nd Amendment", "61st Amendment"],
                0,
            ),
            question(7, "When was the 42nd Amendment enacted?", &["1975", "1976", "1977", "1978"], 1),
            question(
                8,
                "Who has the burden to prove the accused falls under a General Exception in the BNS?",
                &["Prosecution", "Defence", "Accused", "Judge"],
                2,
            ),
            question(
                9,
                "What is the general rule for a child under 7 years?",
                &[
                    "Can be guilty if mature",
                    "Can be guilty if under 12",
                    "Not criminally liable for any offense",
                    "Presumed to be guilty",
                ],
                2,
            ),
            question(
                10,
                "Under Section 23 of BNS, when is intoxication not a defense?",
                &[
                    "Voluntary intoxication",
                    "Intoxication caused by medication",
                    "Without the knowledge of the accused",
                    "When the intoxication was due to accident",
                ],
                0,
            ),
        ],
    }
}

/// Look up a quiz by id.
pub fn find_quiz(quizzes: &[Quiz], id: i64) -> Option<&Quiz> {
    quizzes.iter().find(|q| q.id == id)
}

/// Every question of every quiz, in quiz order.
pub fn all_questions(quizzes: &[Quiz]) -> Vec<Question> {
    quizzes.iter().flat_map(|q| q.questions.iter().cloned()).collect()
}
