//! Client-side gate for submitted links.
//!
//! This is a coarse check only. The server remains the authority and may
//! reject a link that passes here.

use thiserror::Error;

/// A link is accepted when it starts with at least one of these.
pub const ALLOWED_LINK_PREFIXES: [&str; 2] =
    ["https://forum.treetree2.school", "https://discord.com"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("Link inválido...")]
    Empty,
    #[error("Link inválido...")]
    NotAllowed(String),
}

/// Returns the trimmed link when it is non-empty and allow-listed.
pub fn check_link(link: &str) -> Result<&str, LinkError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(LinkError::Empty);
    }
    if ALLOWED_LINK_PREFIXES
        .iter()
        .any(|prefix| link.starts_with(prefix))
    {
        Ok(link)
    } else {
        Err(LinkError::NotAllowed(link.to_string()))
    }
}
