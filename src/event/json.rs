use super::ParsedEvent;

fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

pub(super) fn event_to_json(parsed: &ParsedEvent) -> String {
    let player_json = parsed
        .player_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "null".to_string());
    let point_json = parsed
        .point_awarded_to
        .map(|side| json_string(side.as_str()))
        .unwrap_or_else(|| "null".to_string());

    format!(
        r#"{{"setNumber":{},"playerNumber":{},"event":{},"pointAwardedTo":{},"needsReview":{},"rawText":{}}}"#,
        parsed.set_number,
        player_json,
        json_string(&parsed.event),
        point_json,
        if parsed.needs_review { "true" } else { "false" },
        json_string(&parsed.raw_text),
    )
}
