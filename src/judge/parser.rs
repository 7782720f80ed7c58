// src/judge/parser.rs — Extract feedback and score from a judge reply

use super::Evaluation;
use crate::infra::errors::JudgeError;

const FEEDBACK_OPEN: &str = "<feedback>\n";
const FEEDBACK_CLOSE: &str = "\n</feedback>";
const SCORE_OPEN: &str = "<score>\n";
const SCORE_CLOSE: &str = "\n</score>";

/// Parse a reply of the form:
///
/// ```text
/// <feedback>
/// free text
/// </feedback>
/// <score>
/// 4
/// </score>
/// ```
///
/// Surrounding whitespace is trimmed first. Each marker is located by its
/// first occurrence; the order of the two blocks is not checked, and the
/// enclosed text is taken as is (no inner trimming). A closing marker that
/// starts before its opening marker ends is treated as missing.
pub fn parse_reply(reply: &str) -> Result<Evaluation, JudgeError> {
    let text = reply.trim();

    let reasoning = enclosed(text, FEEDBACK_OPEN, FEEDBACK_CLOSE);
    let raw_score = enclosed(text, SCORE_OPEN, SCORE_CLOSE);

    let (Some(reasoning), Some(raw_score)) = (reasoning, raw_score) else {
        return Err(JudgeError::Format);
    };

    let score = raw_score.parse::<i64>()?;

    Ok(Evaluation {
        score,
        reasoning: reasoning.to_string(),
    })
}

fn enclosed<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let end = text.find(close)?;
    text.get(start..end)
}
