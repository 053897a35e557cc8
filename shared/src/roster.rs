//! Filtering for the student roster.
//!
//! The visible list is re-derived from the full list on every render. Rosters
//! are class sized, so a linear scan is all this needs.

use crate::student::{Grade, Student};

/// Single-select grade filter. Selecting the active grade again clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeFilter(Option<Grade>);

impl GradeFilter {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_active(&self, grade: Grade) -> bool {
        self.0 == Some(grade)
    }

    pub fn toggle(&mut self, grade: Grade) {
        self.0 = if self.0 == Some(grade) { None } else { Some(grade) };
        log::debug!("Grade filter is now {:?}", self.0);
    }

    pub fn admits(&self, grade: Grade) -> bool {
        self.0.map_or(true, |active| active == grade)
    }
}

/// Search text plus grade filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub query: String,
    pub grade: GradeFilter,
}

impl StudentFilter {
    pub fn new(query: impl Into<String>, grade: GradeFilter) -> Self {
        Self {
            query: query.into(),
            grade,
        }
    }

    pub fn matches(&self, student: &Student) -> bool {
        let needle = self.query.to_lowercase();
        student.name.to_lowercase().contains(&needle) && self.grade.admits(student.grade)
    }

    /// Students passing the filter, in roster order.
    pub fn apply<'a>(&self, students: &'a [Student]) -> Vec<&'a Student> {
        students.iter().filter(|student| self.matches(student)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::ParentInviteStatus;

    fn student(id: &str, name: &str, grade: Grade) -> Student {
        Student {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@school.test", id),
            grade,
            avatar: None,
            parent_email: None,
            parent_invite_status: ParentInviteStatus::Accepted,
            access_code: format!("CODE-{}", id),
        }
    }

    fn roster() -> Vec<Student> {
        vec![
            student("1", "Maya Patel", Grade::Second),
            student("2", "Liam O'Brien", Grade::Third),
            student("3", "Amaya Chen", Grade::Second),
            student("4", "Noah Smith", Grade::Sixth),
        ]
    }

    fn ids(students: &[&Student]) -> Vec<String> {
        students.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let students = roster();
        let visible = StudentFilter::default().apply(&students);
        assert_eq!(ids(&visible), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let students = roster();
        let visible = StudentFilter::new("MAYA", GradeFilter::none()).apply(&students);
        assert_eq!(ids(&visible), vec!["1", "3"]);

        let visible = StudentFilter::new("o'b", GradeFilter::none()).apply(&students);
        assert_eq!(ids(&visible), vec!["2"]);
    }

    #[test]
    fn test_search_and_grade_intersect() {
        let students = roster();
        let mut grade = GradeFilter::none();
        grade.toggle(Grade::Second);

        let visible = StudentFilter::new("a", grade).apply(&students);
        assert_eq!(ids(&visible), vec!["1", "3"]);

        let visible = StudentFilter::new("noah", grade).apply(&students);
        assert!(visible.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let students = roster();
        let filter = StudentFilter::new("a", GradeFilter::none());
        let once: Vec<Student> = filter.apply(&students).into_iter().cloned().collect();
        let twice: Vec<Student> = filter.apply(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
        assert_eq!(once.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_matches_agrees_with_apply() {
        let students = roster();
        let mut grade = GradeFilter::none();
        grade.toggle(Grade::Sixth);
        let filter = StudentFilter::new("smith", grade);
        let expected: Vec<&Student> = students.iter().filter(|s| filter.matches(s)).collect();
        assert_eq!(filter.apply(&students), expected);
    }

    #[test]
    fn test_grade_toggle() {
        let mut grade = GradeFilter::none();
        grade.toggle(Grade::First);
        assert!(grade.is_active(Grade::First));

        grade.toggle(Grade::Fourth);
        assert!(grade.is_active(Grade::Fourth));
        assert!(!grade.is_active(Grade::First));

        grade.toggle(Grade::Fourth);
        assert_eq!(grade, GradeFilter::none());
    }
}
