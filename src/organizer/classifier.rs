use crate::utils::has_extension;

/// Ordered mapping from category name to the extensions it claims.
///
/// Lookups walk the table in insertion order, so when two categories list the
/// same extension the earlier one wins.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<(String, Vec<String>)>,
    default_category: String,
}

impl CategoryTable {
    /// Create an empty table that sends everything to `default_category`
    pub fn new(default_category: &str) -> Self {
        Self {
            categories: Vec::new(),
            default_category: default_category.to_string(),
        }
    }

    /// Append a category; extensions are stored lowercase without the leading dot
    pub fn push<'a, I>(&mut self, name: &str, extensions: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self.categories.push((name.to_string(), extensions));
    }

    /// Category for `file_name`, or the default bucket when nothing matches
    pub fn classify(&self, file_name: &str) -> &str {
        self.categories
            .iter()
            .find(|(_, extensions)| extensions.iter().any(|ext| has_extension(file_name, ext)))
            .map(|(name, _)| name.as_str())
            .unwrap_or(self.default_category.as_str())
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Category names in match order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        crate::config::Config::default().category_table()
    }
}
