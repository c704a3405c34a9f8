use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Category name that stands for "no category filter".
pub const ALL_CATEGORIES: &str = "All";

#[derive(PartialEq, Debug, Eq, Clone, Serialize, Deserialize)]
pub struct Course {
    id: String,
    title: String,
    link: String,
    category: String,
}

impl Course {
    pub fn new(id: String, title: &str, link: &str, category: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            link: link.to_string(),
            category: category.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The link exactly as it was entered.
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t[{}] {}\t{}",
            self.id, self.category, self.title, self.link
        )
    }
}

/// Which courses a student sees: an optional exact category and a
/// case-insensitive title search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    category: Option<String>,
    search: String,
}

impl CourseFilter {
    pub fn new(category: Option<String>, search: impl Into<String>) -> Self {
        Self {
            category: category.filter(|category| category != ALL_CATEGORIES),
            search: search.into(),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, course: &Course) -> bool {
        let category_matches = self
            .category
            .as_deref()
            .is_none_or(|category| category == course.category);

        category_matches
            && course
                .title
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}

/// A course together with the URL its video player should load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCard {
    course: Course,
    embed_url: Option<String>,
}

impl CourseCard {
    pub fn new(course: Course, embed_url: Option<String>) -> Self {
        Self { course, embed_url }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    /// `None` means the link could not be turned into a playable video.
    pub fn embed_url(&self) -> Option<&str> {
        self.embed_url.as_deref()
    }
}

impl Display for CourseCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}\t{}",
            self.course.category,
            self.course.title,
            self.embed_url.as_deref().unwrap_or("Invalid Video Link")
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn build_course(title: &str, category: &str) -> Course {
        Course::new("crs_1".to_string(), title, "https://youtu.be/dQw4w9WgXcQ", category)
    }

    #[test]
    fn course_filter_all_matches_everything() {
        let filter = CourseFilter::all();

        assert!(filter.matches(&build_course("Rust basics", "Programming")));
        assert!(filter.matches(&build_course("", "")));
    }

    #[test]
    fn course_filter_new_fn_treats_all_category_as_no_filter() {
        let filter = CourseFilter::new(Some(ALL_CATEGORIES.to_string()), "");

        assert_eq!(filter, CourseFilter::all());
    }

    #[test]
    fn course_filter_matches_category_exactly() {
        let filter = CourseFilter::new(Some("Programming".to_string()), "");

        assert!(filter.matches(&build_course("Rust basics", "Programming")));
        assert!(!filter.matches(&build_course("Rust basics", "programming")));
        assert!(!filter.matches(&build_course("Algebra", "Math")));
    }

    #[test]
    fn course_filter_search_is_case_insensitive() {
        let filter = CourseFilter::new(None, "RUST");

        assert!(filter.matches(&build_course("Intro to rust", "Programming")));
        assert!(!filter.matches(&build_course("Intro to Go", "Programming")));
    }

    #[test]
    fn course_filter_requires_both_category_and_search() {
        let filter = CourseFilter::new(Some("Math".to_string()), "rust");

        assert!(!filter.matches(&build_course("Rust basics", "Programming")));
        assert!(!filter.matches(&build_course("Algebra", "Math")));
        assert!(filter.matches(&build_course("Rust for mathematicians", "Math")));
    }

    #[test]
    fn course_card_display_shows_placeholder_without_embed_url() {
        let card = CourseCard::new(build_course("Algebra", "Math"), None);

        assert_eq!(card.to_string(), "[Math] Algebra\tInvalid Video Link");
    }
}
