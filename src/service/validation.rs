//! Field rules for `NewStudent`. Every field is checked before anything is persisted.

use crate::model::NewStudent;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 120;
pub const MAX_NAME_LEN: usize = 100;

/// A single constraint attached to a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    Gte(i64),
    Lte(i64),
    /// Upper bound on string length in characters.
    MaxLen(usize),
}

impl Rule {
    pub fn tag(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Email => "email",
            Rule::Gte(_) => "gte",
            Rule::Lte(_) => "lte",
            Rule::MaxLen(_) => "max",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub rule: Rule,
}

impl FieldViolation {
    pub fn new(field: &'static str, rule: Rule) -> Self {
        FieldViolation { field, rule }
    }

    /// Human-readable message. Rules without a canned template fall back to a generic one.
    pub fn message(&self) -> String {
        let field = self.field;
        match &self.rule {
            Rule::Required => format!("{} is required", field),
            Rule::Email => format!("{} must be a valid email", field),
            Rule::Gte(n) => format!("{} must be greater than or equal to {}", field, n),
            Rule::Lte(n) => format!("{} must be less than or equal to {}", field, n),
            _ => format!("{} is not valid", field),
        }
    }
}

/// Ordered, non-empty set of violations. Displays as the comma-joined messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        ValidationErrors(violations)
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(FieldViolation::message).collect();
        f.write_str(&messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

enum Value<'a> {
    Str(&'a str),
    Int(i64),
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("email pattern is valid")
    })
}

fn check(value: &Value<'_>, rule: &Rule) -> bool {
    match (value, rule) {
        (Value::Str(s), Rule::Required) => !s.is_empty(),
        (Value::Int(n), Rule::Required) => *n != 0,
        (Value::Str(s), Rule::Email) => email_regex().is_match(s),
        (Value::Int(n), Rule::Gte(min)) => n >= min,
        (Value::Int(n), Rule::Lte(max)) => n <= max,
        (Value::Str(s), Rule::MaxLen(max)) => s.chars().count() <= *max,
        _ => true,
    }
}

/// Validate all fields. Each field reports at most its first failing rule.
pub fn validate_student(s: &NewStudent) -> Result<(), ValidationErrors> {
    let fields: [(&'static str, Value<'_>, Vec<Rule>); 3] = [
        ("Name", Value::Str(&s.name), vec![Rule::Required, Rule::MaxLen(MAX_NAME_LEN)]),
        ("Email", Value::Str(&s.email), vec![Rule::Required, Rule::Email]),
        (
            "Age",
            Value::Int(i64::from(s.age)),
            vec![Rule::Required, Rule::Gte(MIN_AGE), Rule::Lte(MAX_AGE)],
        ),
    ];

    let violations: Vec<FieldViolation> = fields
        .iter()
        .filter_map(|(field, value, rules)| {
            rules
                .iter()
                .find(|rule| !check(value, rule))
                .map(|rule| FieldViolation::new(*field, rule.clone()))
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::new(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn valid_student_passes() {
        assert!(validate_student(&NewStudent::new("Ada", "ada@example.com", 30)).is_ok());
    }

    #[test]
    fn reports_every_field_in_order() {
        let errs = validate_student(&NewStudent::new("", "bad", 200)).unwrap_err();
        let rules: Vec<_> = errs.violations().iter().map(|v| (v.field, v.rule.clone())).collect();
        assert_eq!(
            rules,
            vec![("Name", Rule::Required), ("Email", Rule::Email), ("Age", Rule::Lte(MAX_AGE))]
        );
        assert_eq!(
            errs.to_string(),
            "Name is required, Email must be a valid email, Age must be less than or equal to 120"
        );
    }

    #[test]
    fn missing_values_are_required() {
        let errs = validate_student(&NewStudent::default()).unwrap_err();
        assert!(errs.violations().iter().all(|v| v.rule == Rule::Required));
        assert_eq!(errs.violations().len(), 3);
    }

    #[test]
    fn negative_age_hits_lower_bound() {
        let errs = validate_student(&NewStudent::new("Ada", "ada@example.com", -4)).unwrap_err();
        assert_eq!(errs.to_string(), "Age must be greater than or equal to 1");
    }

    #[test]
    fn rule_without_template_uses_generic_message() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let errs = validate_student(&NewStudent::new(long, "ada@example.com", 30)).unwrap_err();
        assert_eq!(errs.violations()[0].rule.tag(), "max");
        assert_eq!(errs.to_string(), "Name is not valid");
    }

    #[test]
    fn email_syntax() {
        for ok in ["a@b.co", "first.last+tag@sub.example.org"] {
            assert!(email_regex().is_match(ok), "{ok}");
        }
        for bad in ["bad", "a@", "@b.co", "a@b", "a b@c.de", "a@@b.co"] {
            assert!(!email_regex().is_match(bad), "{bad}");
        }
    }

    proptest! {
        #[test]
        fn strings_without_at_sign_are_rejected(email in "[a-z0-9.]{1,30}") {
            let errs = validate_student(&NewStudent::new("Ada", email, 30)).unwrap_err();
            prop_assert!(errs.has_field("Email"));
            prop_assert_eq!(errs.violations().len(), 1);
        }
    }
}
