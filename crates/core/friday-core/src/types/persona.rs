//! Assistant personas

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the assistant identities whose labeled answer joins a combined response
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Persona {
    /// Display name, used as the answer label ("Grok")
    pub name: String,
    /// Route segment of the persona's proxy endpoint (`/api/<slug>`)
    pub slug: String,
}

impl Persona {
    /// Create a persona
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// xAI-backed persona, answered first
    pub fn grok() -> Self {
        Self::new("Grok", "grok")
    }

    /// OpenAI-backed persona, answered second
    pub fn friday() -> Self {
        Self::new("F.R.I.D.A.Y.", "friday")
    }

    /// Proxy endpoint path for this persona
    pub fn route(&self) -> String {
        format!("/api/{}", self.slug)
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_personas() {
        assert_eq!(Persona::grok().route(), "/api/grok");
        assert_eq!(Persona::friday().route(), "/api/friday");
        assert_eq!(Persona::friday().to_string(), "F.R.I.D.A.Y.");
    }
}
