//! Quote tracking for quote-span protection.
//!
//! The state flips each time a `"` is seen in token order. This is
//! approximate: one stray quote mark inverts the state for the rest of the
//! text.

/// Whether the scan is currently inside a quoted span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuoteState {
    inside: bool,
}

impl QuoteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Observe a token: any token containing `"` flips the state. Returns
    /// whether the token is inside a quoted span afterwards, so an opening
    /// quote counts as inside and a closing quote as outside.
    pub fn observe_token(&mut self, token: &str) -> bool {
        if token.contains('"') {
            self.inside = !self.inside;
        }
        self.inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_toggling() {
        let mut state = QuoteState::new();
        let protected: Vec<bool> = ["He", "said", "\"", "hi", "\"", "loudly"]
            .iter()
            .map(|t| state.observe_token(t))
            .collect();
        assert_eq!(protected, vec![false, false, true, true, false, false]);
    }

    #[test]
    fn test_stray_quote_desynchronises() {
        let mut state = QuoteState::new();
        state.observe_token("\"");
        assert!(state.observe_token("everything"));
        assert!(state.is_inside());
    }
}
