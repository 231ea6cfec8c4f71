use obs_core::dispatch::Action;

/// Parse an action name, case-insensitively
pub fn parse_action(s: &str) -> std::result::Result<Action, String> {
    s.parse::<Action>().map_err(|e| e.to_string())
}
