pub mod youtube;

/// Turns a course link, as an admin typed it in, into something a video
/// player frame can load.
pub trait EmbedURLResolver {
    /// Returns `None` when no embeddable URL can be derived. That is an
    /// ordinary outcome, callers show a placeholder for it.
    fn resolve(&self, link: Option<&str>) -> Option<String>;
}
