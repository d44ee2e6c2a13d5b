//! Service category labels.

use std::fmt;

use serde::Serialize;

use super::DomainError;

/// A service category such as `shop`, `school` or `clinic`.
///
/// Always non-empty and trimmed. Nodes whose label is blank have no category.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Parse a category label, rejecting blank input.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCategory(s.to_string()));
        }
        Ok(Category(trimmed.to_string()))
    }

    /// Map an optional raw label to a category.
    ///
    /// Absent and blank labels both mean "no category".
    pub fn from_label(label: Option<&str>) -> Option<Self> {
        label.and_then(|l| Category::parse(l).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({})", self.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
