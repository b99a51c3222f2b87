use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedParseError {
    #[error("Unterminated seed list \"{0}\"")]
    Unterminated(String),

    #[error("Unexpected bracket in seed list \"{0}\"")]
    StrayBracket(String),
}

fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Splits the raw `seeds` column into keyword tokens.
///
/// Accepts python-style lists (`['happy', 'fun']`), JSON-style lists
/// (`["happy","fun"]`) and bare comma separated values (`happy, fun`).
pub fn parse_seeds(raw: &str) -> Result<Vec<String>, SeedParseError> {
    let trimmed = raw.trim();

    let inner = match trimmed.strip_prefix('[') {
        Some(rest) => rest
            .strip_suffix(']')
            .ok_or_else(|| SeedParseError::Unterminated(raw.to_owned()))?,
        None if trimmed.ends_with(']') => {
            return Err(SeedParseError::StrayBracket(raw.to_owned()));
        }
        None => trimmed,
    };

    if inner.contains(|c| c == '[' || c == ']') {
        return Err(SeedParseError::StrayBracket(raw.to_owned()));
    }

    Ok(inner
        .split(',')
        .map(|token| token.trim().trim_matches(is_quote).trim())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect())
}
