//! Route pattern compilation.
//!
//! A pattern is a suffix matcher made of literal text and placeholders:
//!
//! | syntax  | meaning                                                 |
//! |---------|---------------------------------------------------------|
//! | `*`     | anonymous placeholder, shortest run of any characters   |
//! | `:name` | named placeholder, shortest run of at least one character |
//! | `\*`    | literal `*`                                             |
//! | `\:`    | literal `:`                                             |
//!
//! Other text is copied into the regular expression unchanged, so authors
//! may use regex syntax (`/[0-9]+`). Patterns are anchored at the end only:
//! `/foo` matches any URL ending in `/foo`.

use fetchware_core::{Params, RegistrationError};
use regex::Regex;

const CROWDED: &str = "invalid usage of named placeholders";
const DANGLING_ESCAPE: &str = "pattern ends with an unfinished escape";
const ANONYMOUS: &str = "(?:.*?)";

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Literal(String),
    Anonymous,
    Named(String),
}

fn push_literal(tokens: &mut Vec<Token>, text: &str) {
    match tokens.last_mut() {
        Some(Token::Literal(literal)) => literal.push_str(text),
        _ => tokens.push(Token::Literal(text.to_string())),
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, RegistrationError> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('*') => push_literal(&mut tokens, "\\*"),
                Some(':') => push_literal(&mut tokens, ":"),
                Some(other) => {
                    push_literal(&mut tokens, "\\");
                    push_literal(&mut tokens, other.encode_utf8(&mut [0; 4]));
                }
                // Would escape the end anchor.
                None => return Err(RegistrationError::invalid_pattern(pattern, DANGLING_ESCAPE)),
            },
            '*' => match tokens.last() {
                Some(Token::Anonymous) => {}
                Some(Token::Named(_)) => {
                    return Err(RegistrationError::invalid_pattern(pattern, CROWDED));
                }
                _ => tokens.push(Token::Anonymous),
            },
            ':' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if !next.is_ascii_alphanumeric() {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }

                if name.is_empty() {
                    push_literal(&mut tokens, ":");
                    continue;
                }

                if matches!(tokens.last(), Some(Token::Named(_) | Token::Anonymous)) {
                    return Err(RegistrationError::invalid_pattern(pattern, CROWDED));
                }
                tokens.push(Token::Named(name));
            }
            other => push_literal(&mut tokens, other.encode_utf8(&mut [0; 4])),
        }
    }

    Ok(tokens)
}

/// A route pattern compiled into a regular expression.
#[derive(Debug, Clone)]
pub struct CompiledPath {
    pattern: String,
    regex: Regex,
    placeholder_names: Vec<String>,
    group_names: Vec<String>,
}

impl CompiledPath {
    /// Compile `pattern`.
    ///
    /// Fails with [`RegistrationError::InvalidPattern`] when two named
    /// placeholders, or a named and an anonymous one, touch each other, or
    /// when the resulting expression is not valid.
    pub fn compile(pattern: &str) -> Result<Self, RegistrationError> {
        let tokens = tokenize(pattern)?;

        let mut source = String::with_capacity(pattern.len() + 16);
        let mut placeholder_names = Vec::new();
        let mut group_names = Vec::new();

        for token in tokens {
            match token {
                Token::Literal(text) => source.push_str(&text),
                Token::Anonymous => source.push_str(ANONYMOUS),
                Token::Named(name) => {
                    // Generated group names keep author-written groups from
                    // shifting parameter positions.
                    let group = format!("__fw{}", group_names.len());
                    source.push_str(&format!("(?P<{group}>.+?)"));
                    group_names.push(group);
                    placeholder_names.push(name);
                }
            }
        }
        source.push('$');

        let regex = Regex::new(&source)
            .map_err(|e| RegistrationError::invalid_pattern(pattern, e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            placeholder_names,
            group_names,
        })
    }

    /// The pattern as written.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled regular expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Names of the named placeholders, left to right.
    pub fn placeholder_names(&self) -> &[String] {
        &self.placeholder_names
    }

    /// Whether `url` matches.
    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// Match `url` and collect the named placeholder values.
    ///
    /// Returns `None` when the URL does not match, and an empty [`Params`]
    /// for a match on a pattern without named placeholders.
    pub fn captures(&self, url: &str) -> Option<Params> {
        if self.group_names.is_empty() {
            return self.regex.is_match(url).then(Params::new);
        }

        let captures = self.regex.captures(url)?;
        Some(
            self.placeholder_names
                .iter()
                .zip(&self.group_names)
                .map(|(name, group)| {
                    let value = captures.name(group).map_or("", |m| m.as_str());
                    (name.as_str(), value)
                })
                .collect(),
        )
    }
}
