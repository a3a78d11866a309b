//! Ant-style path matching for route rules.
//!
//! # Pattern Syntax
//!
//! - `?` matches exactly one character
//! - `*` matches zero or more characters within a path segment
//! - `**` matches zero or more path segments
//!
//! Patterns are rooted: `errors/**` and `/errors/**` are the same pattern.
//! Matching is case-sensitive.
//!
//! ```rust
//! use travel_agency_security::http::security::ant_matcher::AntMatcher;
//!
//! let matcher = AntMatcher::new("/hotels/**");
//! assert!(matcher.matches("/hotels"));
//! assert!(matcher.matches("/hotels/42/rooms"));
//! assert!(!matcher.matches("/hotelsx"));
//! ```
//!
//! # Spring Equivalent
//!
//! `org.springframework.util.AntPathMatcher`

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    /// A single segment containing `*` or `?`
    Wildcard(Vec<char>),
    /// `**`
    AnySegments,
}

/// A compiled Ant-style path pattern.
#[derive(Debug, Clone)]
pub struct AntMatcher {
    pattern: String,
    segments: Vec<Segment>,
}

impl AntMatcher {
    pub fn new(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|part| {
                if part == "**" {
                    Segment::AnySegments
                } else if part.contains('*') || part.contains('?') {
                    Segment::Wildcard(part.chars().collect())
                } else {
                    Segment::Literal(part.to_string())
                }
            })
            .collect();

        AntMatcher {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// The pattern as it was written.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, path: &str) -> bool {
        let path: Vec<&str> = split_path(path).collect();
        match_segments(&self.segments, &path)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::AnySegments, rest)) => {
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((segment, rest)) => match path.split_first() {
            None => false,
            Some((head, tail)) => {
                let hit = match segment {
                    Segment::Literal(literal) => literal == head,
                    Segment::Wildcard(chars) => {
                        match_chars(chars, &head.chars().collect::<Vec<_>>())
                    }
                    Segment::AnySegments => unreachable!(),
                };
                hit && match_segments(rest, tail)
            }
        },
    }
}

fn match_chars(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => (0..=text.len()).any(|skip| match_chars(rest, &text[skip..])),
        Some(('?', rest)) => !text.is_empty() && match_chars(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && match_chars(rest, &text[1..]),
    }
}

/// An ordered set of patterns; matches when any member does.
#[derive(Debug, Clone, Default)]
pub struct AntMatchers {
    matchers: Vec<AntMatcher>,
}

impl AntMatchers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(patterns: &[&str]) -> Self {
        AntMatchers {
            matchers: patterns.iter().map(|p| AntMatcher::new(p)).collect(),
        }
    }

    /// Matches every path.
    pub fn any_request() -> Self {
        Self::of(&["/**"])
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }

    pub fn patterns(&self) -> Vec<&str> {
        self.matchers.iter().map(|m| m.pattern()).collect()
    }
}
