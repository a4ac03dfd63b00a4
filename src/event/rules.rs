use std::sync::LazyLock;

pub const POINT_US: &str = "point us";
pub const POINT_THEM: &str = "point them";

/// Side a matched event awards the rally point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSide {
    Us,
    Them,
}

impl PointSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Them => "them",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRule {
    pub phrase: &'static str,
    pub kind: &'static str,
    pub point: Option<PointSide>,
}

const fn rule(phrase: &'static str, kind: &'static str, point: Option<PointSide>) -> EventRule {
    EventRule {
        phrase,
        kind,
        point,
    }
}

/// Canonical phrase vocabulary. Phrases are lower-case and single-spaced.
pub const EVENT_RULES: &[EventRule] = &[
    rule("kill", "KILL", Some(PointSide::Us)),
    rule("dig", "DIG", None),
    rule("ace", "ACE", Some(PointSide::Us)),
    rule("block", "BLOCK", Some(PointSide::Us)),
    rule("assist", "ASSIST", None),
    rule("hit attempt", "HIT_ATTEMPT", None),
    rule("hitting error", "HITTING_ERROR", Some(PointSide::Them)),
    rule("serve error", "SERVE_ERROR", Some(PointSide::Them)),
    rule("reception error", "RECEPTION_ERROR", Some(PointSide::Them)),
    rule("block error", "BLOCK_ERROR", Some(PointSide::Them)),
    rule(
        "ball handling error",
        "BALL_HANDLING_ERROR",
        Some(PointSide::Them),
    ),
    rule(POINT_US, "POINT_US", Some(PointSide::Us)),
    rule(POINT_THEM, "POINT_THEM", Some(PointSide::Them)),
];

/// Rules eligible for phrase matching, longest phrase first. Equal lengths keep
/// table order.
static MATCH_CANDIDATES: LazyLock<Vec<&'static EventRule>> = LazyLock::new(|| {
    let mut candidates: Vec<&'static EventRule> = EVENT_RULES
        .iter()
        .filter(|r| !is_point_command(r.phrase))
        .collect();
    candidates.sort_by(|a, b| b.phrase.len().cmp(&a.phrase.len()));
    candidates
});

pub fn is_point_command(phrase: &str) -> bool {
    phrase == POINT_US || phrase == POINT_THEM
}

pub fn lookup(phrase: &str) -> Option<&'static EventRule> {
    EVENT_RULES.iter().find(|r| r.phrase == phrase)
}

pub fn match_candidates() -> &'static [&'static EventRule] {
    &MATCH_CANDIDATES
}
