use serde::{ Deserialize, Serialize };
use std::fmt;

/// The text span whose factual accuracy is being assessed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    pub fn new(text: impl Into<String>) -> Self {
        Claim(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Claim {
    fn from(text: &str) -> Self {
        Claim::new(text)
    }
}

impl From<String> for Claim {
    fn from(text: String) -> Self {
        Claim(text)
    }
}

/// The claim after model elaboration, plus the keywords used for discovery.
///
/// `context` is never empty: a blank model answer falls back to the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinedContext {
    pub context: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl RefinedContext {
    /// Fallback used when refinement fails entirely
    pub fn fallback(claim: &Claim) -> Self {
        RefinedContext {
            context: claim.as_str().to_string(),
            keywords: Vec::new(),
        }
    }
}
