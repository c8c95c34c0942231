//! Typed access to the loosely-typed arguments of a tool call.
//!
//! `required_*` accessors fail with `MissingRequiredArgument` when the key is
//! absent and with `InvalidArgumentType` when the value has the wrong shape.
//! `optional_*` accessors never fail; a missing or mistyped value reads as
//! `None`.

use crate::error::{Result, TelegramError};
use crate::value::{Arguments, Value};

/// Validates and coerces the arguments of one call.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentExtractor<'a> {
    arguments: &'a Arguments,
}

impl<'a> ArgumentExtractor<'a> {
    pub fn new(arguments: &'a Arguments) -> Self {
        Self { arguments }
    }

    fn require(&self, key: &str) -> Result<&'a Value> {
        self.arguments
            .get(key)
            .ok_or_else(|| TelegramError::MissingRequiredArgument(key.to_string()))
    }

    pub fn required_string(&self, key: &str) -> Result<String> {
        let value = self.require(key)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| TelegramError::invalid_type(key, "string", value.type_name()))
    }

    pub fn optional_string(&self, key: &str) -> Option<String> {
        self.arguments
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Reads a Telegram identifier. Numeric strings are accepted.
    pub fn required_int64(&self, key: &str) -> Result<i64> {
        let value = self.require(key)?;
        value
            .as_int64()
            .ok_or_else(|| TelegramError::invalid_type(key, "integer (int64)", value.type_name()))
    }

    pub fn optional_int64(&self, key: &str) -> Option<i64> {
        self.arguments.get(key).and_then(Value::as_int64)
    }

    /// Reads a 32-bit integer such as a page size.
    pub fn optional_int(&self, key: &str) -> Option<i32> {
        self.arguments.get(key).and_then(Value::as_int32)
    }

    pub fn optional_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(Value::as_bool)
    }

    /// Reads an array of identifiers.
    ///
    /// Decoding is lenient: elements that are not integers (or numeric
    /// strings) are dropped and the rest are returned.
    pub fn required_int64_array(&self, key: &str) -> Result<Vec<i64>> {
        let value = self.require(key)?;
        let items = value
            .as_array()
            .ok_or_else(|| TelegramError::invalid_type(key, "array", value.type_name()))?;
        Ok(items.iter().filter_map(Value::as_int64).collect())
    }

    /// True when the key is present and not null.
    pub fn has(&self, key: &str) -> bool {
        self.arguments.get(key).is_some_and(|value| !value.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn args(pairs: &[(&str, Value)]) -> Arguments {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_required_string() {
        let args = args(&[("name", Value::from("test"))]);
        let extractor = ArgumentExtractor::new(&args);
        assert_eq!(assert_ok!(extractor.required_string("name")), "test");
    }

    #[test]
    fn test_missing_required_string() {
        let args = Arguments::new();
        let extractor = ArgumentExtractor::new(&args);
        assert_eq!(
            assert_err!(extractor.required_string("name")),
            TelegramError::MissingRequiredArgument("name".into())
        );
    }

    #[test]
    fn test_required_string_wrong_type() {
        let args = args(&[("name", Value::Int(5))]);
        let extractor = ArgumentExtractor::new(&args);
        assert_eq!(
            assert_err!(extractor.required_string("name")),
            TelegramError::invalid_type("name", "string", "integer")
        );
    }

    #[test]
    fn test_required_int64_from_int_and_string() {
        let args = args(&[
            ("chat_id", Value::from("123456789")),
            ("user_id", Value::Int(9_876_543_210)),
        ]);
        let extractor = ArgumentExtractor::new(&args);
        assert_eq!(assert_ok!(extractor.required_int64("chat_id")), 123_456_789);
        assert_eq!(assert_ok!(extractor.required_int64("user_id")), 9_876_543_210);
    }

    #[test]
    fn test_required_int64_rejects_non_numeric() {
        let args = args(&[("chat_id", Value::from("abc")), ("flag", Value::Bool(true))]);
        let extractor = ArgumentExtractor::new(&args);
        assert_eq!(
            assert_err!(extractor.required_int64("chat_id")),
            TelegramError::invalid_type("chat_id", "integer (int64)", "string")
        );
        assert_eq!(
            assert_err!(extractor.required_int64("flag")),
            TelegramError::invalid_type("flag", "integer (int64)", "boolean")
        );
    }

    #[test]
    fn test_optional_accessors_never_fail() {
        let args = args(&[
            ("name", Value::from("test")),
            ("count", Value::Int(42)),
            ("big", Value::Int(i64::MAX)),
            ("on", Value::Bool(true)),
        ]);
        let extractor = ArgumentExtractor::new(&args);
        assert_eq!(extractor.optional_string("name").as_deref(), Some("test"));
        assert_eq!(extractor.optional_string("count"), None);
        assert_eq!(extractor.optional_string("missing"), None);
        assert_eq!(extractor.optional_int("count"), Some(42));
        assert_eq!(extractor.optional_int("big"), None);
        assert_eq!(extractor.optional_int("missing"), None);
        assert_eq!(extractor.optional_int64("big"), Some(i64::MAX));
        assert_eq!(extractor.optional_bool("on"), Some(true));
        assert_eq!(extractor.optional_bool("name"), None);
    }

    #[test]
    fn test_int64_array_drops_bad_elements() {
        let args = args(&[(
            "user_ids",
            Value::Array(vec![Value::Int(1), Value::from("not-a-number"), Value::Int(3)]),
        )]);
        let extractor = ArgumentExtractor::new(&args);
        assert_eq!(assert_ok!(extractor.required_int64_array("user_ids")), vec![1, 3]);
    }

    #[test]
    fn test_int64_array_requires_array() {
        let args = args(&[("user_ids", Value::Int(1))]);
        let extractor = ArgumentExtractor::new(&args);
        assert_eq!(
            assert_err!(extractor.required_int64_array("user_ids")),
            TelegramError::invalid_type("user_ids", "array", "integer")
        );
        assert_eq!(
            assert_err!(extractor.required_int64_array("other")),
            TelegramError::MissingRequiredArgument("other".into())
        );
    }

    #[test]
    fn test_has_ignores_null() {
        let args = args(&[("a", Value::Null), ("b", Value::Int(0))]);
        let extractor = ArgumentExtractor::new(&args);
        assert!(!extractor.has("a"));
        assert!(extractor.has("b"));
        assert!(!extractor.has("c"));
    }
}
