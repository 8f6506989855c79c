use crate::domain::model::{
    normalize_identifier, Course, CourseDetail, CourseSummary, NotFound, ParseError,
    ResolvedPrereq,
};
use std::collections::HashMap;

/// Course catalog keyed by normalized course number.
///
/// The catalog is either empty or holds the result of the last successful [`Catalog::load`].
/// A failed load leaves the previous contents in place.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    courses: HashMap<String, Course>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the catalog with the courses built from `records`.
    ///
    /// Each record is the field list of one non-blank source line: number, title, then any
    /// prerequisite numbers. Numbers are uppercased and empty prerequisite fields dropped.
    /// A number seen twice keeps the later record. Returns the number of distinct courses.
    ///
    /// Fails on the first record with fewer than two fields or an empty course number;
    /// `line` in the error is that record's 1-based position in `records`.
    pub fn load<I, R, S>(&mut self, records: I) -> Result<usize, ParseError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut staged: HashMap<String, Course> = HashMap::new();

        for (index, record) in records.into_iter().enumerate() {
            let line = index + 1;
            let fields: Vec<String> = record.into_iter().map(Into::into).collect();

            let course = Course::from_fields(line, &fields).map_err(|e| {
                tracing::warn!("⚠️ Rejecting catalog load: {}", e);
                e
            })?;

            if let Some(previous) = staged.insert(course.number.clone(), course) {
                tracing::debug!(
                    "Record {} overwrites earlier entry for {} ('{}')",
                    line,
                    previous.number,
                    previous.title
                );
            }
        }

        let count = staged.len();
        self.courses = staged;
        tracing::info!("📚 Catalog loaded with {} course(s)", count);

        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn get(&self, identifier: &str) -> Option<&Course> {
        self.courses.get(&normalize_identifier(identifier))
    }

    /// Every course number in ascending order.
    pub fn sorted_identifiers(&self) -> Vec<String> {
        // Keys are stored uppercase, so plain ordering is the case-insensitive one.
        let mut keys: Vec<String> = self.courses.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Number and title of every course, in the same order as [`Catalog::sorted_identifiers`].
    pub fn sorted_summaries(&self) -> Vec<CourseSummary<'_>> {
        let mut summaries: Vec<CourseSummary<'_>> = self
            .courses
            .values()
            .map(|course| CourseSummary {
                number: &course.number,
                title: &course.title,
            })
            .collect();
        summaries.sort_unstable_by(|a, b| a.number.cmp(b.number));
        summaries
    }

    /// `"{number}, {title}"` for a known course.
    pub fn describe_line(&self, identifier: &str) -> Option<String> {
        self.get(identifier)
            .map(|course| format!("{}, {}", course.number, course.title))
    }

    /// Title and prerequisites of a course, each prerequisite resolved against this catalog.
    pub fn describe_detail(&self, identifier: &str) -> Result<CourseDetail<'_>, NotFound> {
        let key = normalize_identifier(identifier);
        let course = self.courses.get(&key).ok_or(NotFound(key))?;

        let prerequisites = course
            .prereq_numbers
            .iter()
            .map(|number| ResolvedPrereq {
                number: number.as_str(),
                title: self.courses.get(number).map(|c| c.title.as_str()),
            })
            .collect();

        Ok(CourseDetail {
            number: &course.number,
            title: &course.title,
            prerequisites,
        })
    }
}
