// Translation memory candidates and scored suggestions
// Origin: ttmserver/TTMServer.php

use serde::{Deserialize, Serialize};

use crate::error::InvalidQuality;

/// A candidate text with caller-defined metadata (e.g. where it came from).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate<M> {
    pub text: String,
    pub metadata: M,
}

impl<M> Candidate<M> {
    pub fn new(text: impl Into<String>, metadata: M) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// A candidate together with its match quality.
///
/// Quality is in `[0, 1]`, 1 being an exact match. It is set once at
/// construction and never modified by ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion<M> {
    candidate: Candidate<M>,
    quality: f64,
}

impl<M> Suggestion<M> {
    /// Create a suggestion, rejecting qualities outside `[0, 1]` and NaN.
    pub fn new(candidate: Candidate<M>, quality: f64) -> Result<Self, InvalidQuality> {
        if !(0.0..=1.0).contains(&quality) {
            return Err(InvalidQuality(quality));
        }
        Ok(Self {
            candidate,
            // Turns -0.0 into 0.0 so ranking sees a single zero.
            quality: quality + 0.0,
        })
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn text(&self) -> &str {
        &self.candidate.text
    }

    pub fn metadata(&self) -> &M {
        &self.candidate.metadata
    }

    pub fn candidate(&self) -> &Candidate<M> {
        &self.candidate
    }

    pub fn into_candidate(self) -> Candidate<M> {
        self.candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(Suggestion::new(Candidate::new("a", ()), 0.0).is_ok());
        assert!(Suggestion::new(Candidate::new("a", ()), 1.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert_eq!(
            Suggestion::new(Candidate::new("a", ()), 1.5).unwrap_err(),
            InvalidQuality(1.5)
        );
        assert!(Suggestion::new(Candidate::new("a", ()), -0.1).is_err());
        assert!(Suggestion::new(Candidate::new("a", ()), f64::NAN).is_err());
    }

    #[test]
    fn accessors() {
        let s = Suggestion::new(Candidate::new("Koira", "core:dog"), 0.8).unwrap();
        assert_eq!(s.text(), "Koira");
        assert_eq!(*s.metadata(), "core:dog");
        assert_eq!(s.quality(), 0.8);
        assert_eq!(s.into_candidate().text, "Koira");
    }
}
