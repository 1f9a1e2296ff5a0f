#[cfg(test)]
#[path = "credential_test.rs"]
mod tests;

use std::fmt;

use anyhow::bail;
use anyhow::Result;

pub const API_KEY: &str = "apiKey";

/// The API key authorizing calls to the explanation provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn parse(text: &str) -> Result<Credential> {
        let key = text.trim();
        if key.is_empty() {
            bail!("Please enter a valid API key.");
        }

        return Ok(Credential(key.to_string()));
    }

    pub fn expose(&self) -> &str {
        return &self.0;
    }

    /// Keeps the first and last few characters so a user can tell which key is
    /// stored without printing it.
    pub fn masked(&self) -> String {
        let chars = self.0.chars().collect::<Vec<char>>();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }

        let head = chars[..4].iter().collect::<String>();
        let tail = chars[chars.len() - 4..].iter().collect::<String>();
        return format!("{head}{}{tail}", "*".repeat(chars.len() - 8));
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "Credential({})", self.masked());
    }
}
