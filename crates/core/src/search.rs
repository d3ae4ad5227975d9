//! Free-text filtering of project lists.

use crate::project::Project;

impl Project {
    /// Case-insensitive substring match on name or client.
    ///
    /// `needle` must already be lowercased.
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.client.to_lowercase().contains(needle)
    }
}

/// Filter `projects` by a search query, preserving order.
///
/// A blank query matches everything.
pub fn filter_projects<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return projects.iter().collect();
    }
    projects
        .iter()
        .filter(|p| p.matches_lowercase(&needle))
        .collect()
}
