use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Canonical form of a course number: surrounding whitespace removed, ASCII uppercased.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub number: String,
    pub title: String,
    pub prereq_numbers: Vec<String>,
}

impl Course {
    /// Builds a course from one record's fields: number, title, then prerequisites.
    /// `line` is only used to label the error for a record with fewer than two fields or
    /// an empty course number.
    pub fn from_fields(line: usize, fields: &[String]) -> Result<Self, ParseError> {
        let [number, title, prereqs @ ..] = fields else {
            return Err(ParseError::too_few_fields(line));
        };

        let number = normalize_identifier(number);
        if number.is_empty() {
            return Err(ParseError::missing_number(line));
        }

        let prereq_numbers = prereqs
            .iter()
            .map(|p| normalize_identifier(p))
            .filter(|p| !p.is_empty())
            .collect();

        Ok(Self {
            number,
            title: title.clone(),
            prereq_numbers,
        })
    }
}

/// One entry of the sorted course listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary<'a> {
    pub number: &'a str,
    pub title: &'a str,
}

impl fmt::Display for CourseSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.number, self.title)
    }
}

/// A prerequisite as seen from the catalog: `title` is `None` when the number is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPrereq<'a> {
    pub number: &'a str,
    pub title: Option<&'a str>,
}

impl fmt::Display for ResolvedPrereq<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.title {
            Some(title) => write!(f, "{} ({})", self.number, title),
            None => write!(f, "{} (not found)", self.number),
        }
    }
}

/// Detail view of a single course. Renders as the title line followed by the prerequisites line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail<'a> {
    pub number: &'a str,
    pub title: &'a str,
    pub prerequisites: Vec<ResolvedPrereq<'a>>,
}

impl CourseDetail<'_> {
    pub fn title_line(&self) -> String {
        format!("{}, {}", self.number, self.title)
    }

    pub fn prerequisites_line(&self) -> String {
        if self.prerequisites.is_empty() {
            return "Prerequisites: None".to_string();
        }

        let rendered: Vec<String> = self.prerequisites.iter().map(|p| p.to_string()).collect();
        format!("Prerequisites: {}", rendered.join(", "))
    }
}

impl fmt::Display for CourseDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title_line())?;
        write!(f, "{}", self.prerequisites_line())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse error on line {line}: {reason}.")]
pub struct ParseError {
    /// 1-based position among the non-blank records handed to the catalog.
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    pub fn too_few_fields(line: usize) -> Self {
        Self {
            line,
            reason: "expected at least 2 fields".to_string(),
        }
    }

    pub fn missing_number(line: usize) -> Self {
        Self {
            line,
            reason: "course number is empty".to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Course '{0}' was not found.")]
pub struct NotFound(pub String);
