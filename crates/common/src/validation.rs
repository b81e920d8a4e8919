//! Declarative input validation
//!
//! A validator is an ordered list of [`Field`]s, each carrying an ordered
//! list of [`Rule`]s. Every rule of every field is evaluated and every
//! failure is collected, so a client sees all problems in one response.

use std::fmt;

use regex::Regex;
use serde_json::Value;

lazy_static::lazy_static! {
    /// Letters, digits, underscores and hyphens
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();

    /// Loose `local@domain.tld` shape check
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Canonical hyphenated UUID, any case
    pub static ref UUID_REGEX: Regex = Regex::new(
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$"
    )
    .unwrap();
}

/// Caller-supplied check for [`RuleKind::Custom`]
pub type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// The check a rule performs
pub enum RuleKind {
    /// Fails on missing, `null` or empty-string values
    Required,
    /// String length lower bound; non-strings pass
    MinLength(usize),
    /// String length upper bound; non-strings pass
    MaxLength(usize),
    /// Regular expression test; non-strings pass
    Pattern(Regex),
    /// Email shape check; non-strings pass
    Email,
    Custom(Predicate),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Required => write!(f, "Required"),
            RuleKind::MinLength(n) => write!(f, "MinLength({n})"),
            RuleKind::MaxLength(n) => write!(f, "MaxLength({n})"),
            RuleKind::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            RuleKind::Email => write!(f, "Email"),
            RuleKind::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// A single rule with an optional override message
#[derive(Debug)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: Option<String>,
}

impl Rule {
    fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    pub fn required() -> Self {
        Self::new(RuleKind::Required)
    }

    pub fn min_length(min: usize) -> Self {
        Self::new(RuleKind::MinLength(min))
    }

    pub fn max_length(max: usize) -> Self {
        Self::new(RuleKind::MaxLength(max))
    }

    pub fn pattern(regex: Regex) -> Self {
        Self::new(RuleKind::Pattern(regex))
    }

    pub fn email() -> Self {
        Self::new(RuleKind::Email)
    }

    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(RuleKind::Custom(Box::new(predicate)))
    }

    /// Replace the templated default message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Evaluate against `value`, returning the failure message if the rule fails
    fn check(&self, field: &str, value: &Value) -> Option<String> {
        let passed = match &self.kind {
            RuleKind::Required => !is_blank(value),
            RuleKind::MinLength(min) => value.as_str().is_none_or(|s| char_len(s) >= *min),
            RuleKind::MaxLength(max) => value.as_str().is_none_or(|s| char_len(s) <= *max),
            RuleKind::Pattern(re) => value.as_str().is_none_or(|s| re.is_match(s)),
            RuleKind::Email => value.as_str().is_none_or(|s| EMAIL_REGEX.is_match(s)),
            RuleKind::Custom(predicate) => predicate(value),
        };

        if passed {
            return None;
        }

        Some(
            self.message
                .clone()
                .unwrap_or_else(|| self.default_message(field)),
        )
    }

    fn default_message(&self, field: &str) -> String {
        match &self.kind {
            RuleKind::Required => format!("{field} is required"),
            RuleKind::MinLength(min) => format!("{field} must be at least {min} characters"),
            RuleKind::MaxLength(max) => format!("{field} must be at most {max} characters"),
            RuleKind::Pattern(_) => format!("{field} format is invalid"),
            RuleKind::Email => format!("{field} must be a valid email"),
            RuleKind::Custom(_) => format!("{field} validation failed"),
        }
    }
}

/// A named value and the rules it must satisfy
#[derive(Debug)]
pub struct Field {
    pub name: String,
    pub value: Value,
    pub rules: Vec<Rule>,
}

impl Field {
    /// `value` of `None` is treated as missing.
    pub fn new(name: impl Into<String>, value: impl Into<Value>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            rules,
        }
    }
}

/// Outcome of running a validator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Join all errors for single-string transport
    pub fn format(&self) -> String {
        self.errors.join("; ")
    }

    /// `Err(Error::Validation)` with the joined messages when invalid
    pub fn into_result(self) -> crate::Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(crate::Error::Validation(self.format()))
        }
    }
}

/// Types that know how to validate themselves (request bodies)
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

/// Evaluate every rule of every field in declaration order
pub fn validate(fields: &[Field]) -> ValidationResult {
    let errors = fields
        .iter()
        .flat_map(|field| {
            field
                .rules
                .iter()
                .filter_map(|rule| rule.check(&field.name, &field.value))
        })
        .collect();

    ValidationResult::from_errors(errors)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

// ===== Endpoint validators =====

pub fn validate_register(
    username: Option<&str>,
    password: Option<&str>,
    name: Option<&str>,
) -> ValidationResult {
    validate(&[
        Field::new(
            "username",
            username,
            vec![
                Rule::required().message("Username is required"),
                Rule::min_length(3).message("Username must be at least 3 characters"),
                Rule::max_length(50).message("Username must be at most 50 characters"),
                Rule::pattern(USERNAME_REGEX.clone()).message(
                    "Username can only contain letters, numbers, underscores and hyphens",
                ),
            ],
        ),
        Field::new(
            "password",
            password,
            vec![
                Rule::required().message("Password is required"),
                Rule::min_length(6).message("Password must be at least 6 characters"),
                Rule::max_length(100).message("Password must be at most 100 characters"),
            ],
        ),
        Field::new(
            "name",
            name,
            vec![
                Rule::required().message("Name is required"),
                Rule::min_length(1).message("Name cannot be empty"),
                Rule::max_length(100).message("Name must be at most 100 characters"),
            ],
        ),
    ])
}

pub fn validate_login(username: Option<&str>, password: Option<&str>) -> ValidationResult {
    validate(&[
        Field::new(
            "username",
            username,
            vec![Rule::required().message("Username is required")],
        ),
        Field::new(
            "password",
            password,
            vec![Rule::required().message("Password is required")],
        ),
    ])
}

pub fn validate_create_post(title: Option<&str>, content: Option<&str>) -> ValidationResult {
    validate(&[
        Field::new(
            "title",
            title,
            vec![
                Rule::required().message("Title is required"),
                Rule::min_length(1).message("Title cannot be empty"),
                Rule::max_length(200).message("Title must be at most 200 characters"),
            ],
        ),
        Field::new(
            "content",
            content,
            vec![
                Rule::required().message("Content is required"),
                Rule::min_length(1).message("Content cannot be empty"),
                Rule::max_length(10000).message("Content must be at most 10000 characters"),
            ],
        ),
    ])
}

pub fn validate_create_comment(content: Option<&str>, post_uuid: Option<&str>) -> ValidationResult {
    validate(&[
        Field::new(
            "content",
            content,
            vec![
                Rule::required().message("Content is required"),
                Rule::min_length(1).message("Content cannot be empty"),
                Rule::max_length(1000).message("Content must be at most 1000 characters"),
            ],
        ),
        Field::new(
            "post_uuid",
            post_uuid,
            vec![Rule::required().message("Post UUID is required")],
        ),
    ])
}

pub fn validate_search_query(query: Option<&str>) -> ValidationResult {
    validate(&[Field::new(
        "search query",
        query,
        vec![
            Rule::required().message("Search query is required"),
            Rule::min_length(1).message("Search query cannot be empty"),
            Rule::max_length(100).message("Search query must be at most 100 characters"),
        ],
    )])
}

pub fn validate_pagination(limit: Option<i64>, offset: Option<i64>) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(limit) = limit {
        if limit < 1 {
            errors.push("Limit must be a positive number".to_string());
        }
        if limit > 100 {
            errors.push("Limit must be at most 100".to_string());
        }
    }

    if offset.is_some_and(|offset| offset < 0) {
        errors.push("Offset must be a non-negative number".to_string());
    }

    ValidationResult::from_errors(errors)
}

pub fn validate_uuid(uuid: Option<&str>) -> ValidationResult {
    validate(&[Field::new(
        "UUID",
        uuid,
        vec![
            Rule::required().message("UUID is required"),
            Rule::pattern(UUID_REGEX.clone()).message("Invalid UUID format"),
        ],
    )])
}
