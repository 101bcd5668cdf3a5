use std::fmt;

const QUERY_MARKER: &str = "multi/query=";
const EXPECTED_SUMMONERS: usize = 5;

/// Input validation failures. These are the only errors surfaced to the
/// user as explicit rejections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    InvalidLink,
    WrongCount(usize),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::InvalidLink => write!(f, "not a valid op.gg multi link"),
            LinkError::WrongCount(n) => {
                write!(f, "expected exactly {EXPECTED_SUMMONERS} summoners, got {n}")
            }
        }
    }
}

impl std::error::Error for LinkError {}

/// Extract the five summoner names from an op.gg multi link.
///
/// The names are whatever sits between `multi/query=` and the next path or
/// query separator, split on commas, in link order. Duplicate and empty
/// segments are allowed; they degrade downstream rather than being rejected
/// here.
pub fn parse_multi_link(link: &str) -> Result<Vec<String>, LinkError> {
    let start = link.find(QUERY_MARKER).ok_or(LinkError::InvalidLink)? + QUERY_MARKER.len();
    let rest = &link[start..];
    let end = rest.find(['/', '?']).unwrap_or(rest.len());
    let query = &rest[..end];

    if query.is_empty() {
        return Err(LinkError::InvalidLink);
    }

    let summoners: Vec<String> = query.split(',').map(|s| s.to_string()).collect();
    if summoners.len() != EXPECTED_SUMMONERS {
        return Err(LinkError::WrongCount(summoners.len()));
    }

    Ok(summoners)
}
