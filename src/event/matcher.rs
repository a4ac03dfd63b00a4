use std::sync::LazyLock;

use super::ParsedEvent;
use super::rules::{self, EventRule};

pub const UNKNOWN_EVENT: &str = "UNKNOWN";

// `\d` is Unicode `Nd`, so Arabic-Indic and fullwidth digits count too.
static PLAYER_NUMBER_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\b(\d{1,2})\b").expect("valid player number regex")
});

static DECIMAL_DIGIT_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\d$").expect("valid decimal digit regex"));

fn is_decimal_digit(cp: u32) -> bool {
    char::from_u32(cp).is_some_and(|c| DECIMAL_DIGIT_RE.is_match(c.encode_utf8(&mut [0; 4])))
}

/// Numeric value of a Unicode decimal digit.
///
/// `Nd` characters are encoded in contiguous runs of ten ascending from zero, so
/// the value is the distance from the start of the run modulo ten.
fn decimal_digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    let cp = c as u32;
    if !is_decimal_digit(cp) {
        return None;
    }
    let preceding = (1..=cp)
        .take_while(|back| is_decimal_digit(cp - back))
        .count() as u32;
    Some(preceding % 10)
}

pub(super) fn extract_player_number(normalized: &str) -> Option<u8> {
    let caps = PLAYER_NUMBER_RE.captures(normalized)?;
    caps.get(1)?
        .as_str()
        .chars()
        .try_fold(0u8, |acc, c| Some(acc * 10 + decimal_digit_value(c)? as u8))
}

/// First candidate phrase contained in `normalized`, longest first.
///
/// Containment is a plain substring test, so a phrase inside an unrelated word
/// still matches ("misplaced" contains "ace").
pub(super) fn find_phrase(normalized: &str) -> Option<&'static EventRule> {
    rules::match_candidates()
        .iter()
        .copied()
        .find(|r| normalized.contains(r.phrase))
}

pub fn match_event(normalized: &str, raw_text: &str, set_number: i64) -> ParsedEvent {
    if rules::is_point_command(normalized)
        && let Some(rule) = rules::lookup(normalized)
    {
        return ParsedEvent {
            set_number,
            player_number: None,
            event: rule.kind.to_string(),
            point_awarded_to: rule.point,
            needs_review: false,
            raw_text: raw_text.to_string(),
        };
    }

    let player_number = extract_player_number(normalized);
    let matched = find_phrase(normalized);

    match (player_number, matched) {
        (Some(player), Some(rule)) => ParsedEvent {
            set_number,
            player_number: Some(player),
            event: rule.kind.to_string(),
            point_awarded_to: rule.point,
            needs_review: false,
            raw_text: raw_text.to_string(),
        },
        _ => ParsedEvent {
            set_number,
            player_number,
            event: UNKNOWN_EVENT.to_string(),
            point_awarded_to: None,
            needs_review: true,
            raw_text: raw_text.to_string(),
        },
    }
}
