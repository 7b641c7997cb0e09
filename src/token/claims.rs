//! Claim accessors and mutators

use super::Token;
use crate::error::{Error, Result};

use serde_json::{Map, Number, Value};

/// JSON type of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimType {
    /// `null`, or the claim is absent
    Null,
    False,
    True,
    Number,
    String,
    Array,
    Object,
}

impl From<&Value> for ClaimType {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => ClaimType::Null,
            Value::Bool(false) => ClaimType::False,
            Value::Bool(true) => ClaimType::True,
            Value::Number(_) => ClaimType::Number,
            Value::String(_) => ClaimType::String,
            Value::Array(_) => ClaimType::Array,
            Value::Object(_) => ClaimType::Object,
        }
    }
}

// Integral values within this bound are stored as JSON integers
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Token {
    /// Claims object
    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    /// Raw claim value
    pub fn claim_value(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Numeric claim; `None` when absent or not a number
    pub fn claim_number(&self, name: &str) -> Option<f64> {
        self.claims.get(name).and_then(Value::as_f64)
    }

    /// String claim; `None` when absent or not a string
    pub fn claim_string(&self, name: &str) -> Option<&str> {
        self.claims.get(name).and_then(Value::as_str)
    }

    /// JSON type of a claim, [`ClaimType::Null`] when absent
    pub fn claim_type(&self, name: &str) -> ClaimType {
        self.claims
            .get(name)
            .map_or(ClaimType::Null, ClaimType::from)
    }

    /// Set a numeric claim
    ///
    /// Integral values serialize without a fractional part (`"exp":1700000000`).
    ///
    /// # Errors
    ///
    /// [`Error::ClaimNumberNotFinite`] for NaN or infinity; the claims are unchanged.
    pub fn set_claim_number(&mut self, name: &str, value: f64) -> Result<()> {
        let number = if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            Number::from(value as i64)
        } else {
            Number::from_f64(value).ok_or(Error::ClaimNumberNotFinite(value))?
        };
        self.set_claim_value(name, Value::Number(number));
        Ok(())
    }

    /// Set a string claim
    pub fn set_claim_string(&mut self, name: &str, value: impl Into<String>) {
        self.set_claim_value(name, Value::String(value.into()));
    }

    /// Set a claim to any JSON value, replacing an existing one
    pub fn set_claim_value(&mut self, name: &str, value: Value) {
        self.claims_text.take();
        self.claims.insert(name.into(), value);
    }

    /// Remove a claim, returning its value
    pub fn remove_claim(&mut self, name: &str) -> Option<Value> {
        let removed = self.claims.shift_remove(name);
        if removed.is_some() {
            self.claims_text.take();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_claims() {
        let token = Token::new(None);
        assert_eq!(token.claim_number("exp"), None);
        assert_eq!(token.claim_string("sub"), None);
        assert_eq!(token.claim_value("sub"), None);
        assert_eq!(token.claim_type("sub"), ClaimType::Null);
    }

    #[test]
    fn test_claim_types() {
        let mut token = Token::new(None);
        token.set_claim_value("n", Value::Null);
        token.set_claim_value("f", json!(false));
        token.set_claim_value("t", json!(true));
        token.set_claim_value("a", json!([1, 2]));
        token.set_claim_value("o", json!({"k": "v"}));
        token.set_claim_string("s", "x");
        token.set_claim_number("num", 1.5).unwrap();

        assert_eq!(token.claim_type("n"), ClaimType::Null);
        assert_eq!(token.claim_type("f"), ClaimType::False);
        assert_eq!(token.claim_type("t"), ClaimType::True);
        assert_eq!(token.claim_type("a"), ClaimType::Array);
        assert_eq!(token.claim_type("o"), ClaimType::Object);
        assert_eq!(token.claim_type("s"), ClaimType::String);
        assert_eq!(token.claim_type("num"), ClaimType::Number);
    }

    #[test]
    fn test_wrong_type_getters() {
        let mut token = Token::new(None);
        token.set_claim_string("sub", "alice");
        token.set_claim_number("exp", 10.0).unwrap();
        assert_eq!(token.claim_number("sub"), None);
        assert_eq!(token.claim_string("exp"), None);
    }

    #[test]
    fn test_integral_numbers() {
        let mut token = Token::new(None);
        token.set_claim_number("exp", 1_700_000_000.0).unwrap();
        token.set_claim_number("ratio", 0.25).unwrap();
        assert_eq!(token.claim_number("exp"), Some(1_700_000_000.0));
        assert_eq!(token.claim_value("exp"), Some(&json!(1_700_000_000i64)));

        let text = token.export(false).unwrap();
        let claims = crate::utils::base64url::decode_string(
            text.split('.').nth(1).unwrap(),
            1024,
        )
        .unwrap();
        assert_eq!(claims, r#"{"exp":1700000000,"ratio":0.25}"#);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut token = Token::new(None);
        assert!(matches!(
            token.set_claim_number("x", f64::NAN),
            Err(Error::ClaimNumberNotFinite(_))
        ));
        assert!(token.set_claim_number("x", f64::INFINITY).is_err());
        assert_eq!(token.claim_type("x"), ClaimType::Null);
    }

    #[test]
    fn test_setters_replace_and_invalidate() {
        let mut token = Token::new(None);
        token.set_claim_string("sub", "alice");
        let first = token.export(true).unwrap();

        token.set_claim_string("sub", "bob");
        let second = token.export(true).unwrap();
        assert_ne!(first, second);
        assert_eq!(token.claims().len(), 1);
        assert_eq!(token.claim_string("sub"), Some("bob"));

        assert_eq!(token.remove_claim("sub"), Some(json!("bob")));
        assert_eq!(token.remove_claim("sub"), None);
        assert!(token.export(true).unwrap().contains(".e30."));
    }

    #[test]
    fn test_export_is_idempotent() {
        let mut token = Token::new(None);
        token.set_claim_string("iss", "https://issuer.example");
        assert_eq!(token.export(true).unwrap(), token.export(true).unwrap());
    }
}
