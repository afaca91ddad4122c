//! Domain types representing spending categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Groups expenses for reporting.
///
/// The built-in variants mirror the category picker. Any other label read
/// from storage is kept verbatim as [`Category::Custom`] and aggregated like
/// the rest. Stored labels match built-ins exactly, so `"food"` stays
/// `Custom("food")` and is written back unchanged; use
/// [`Category::from_input`] for forgiving matching of typed text.
///
/// Equality is structural: a hand-built `Custom("Food")` is not equal to
/// `Category::Food`, although aggregation groups both under the same label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Housing,
    Food,
    Transportation,
    Utilities,
    Insurance,
    Healthcare,
    Savings,
    Personal,
    Entertainment,
    Other,
    Custom(String),
}

impl Category {
    /// Built-in categories in picker order.
    pub const ALL: [Category; 10] = [
        Category::Housing,
        Category::Food,
        Category::Transportation,
        Category::Utilities,
        Category::Insurance,
        Category::Healthcare,
        Category::Savings,
        Category::Personal,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::Housing => "Housing",
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Utilities => "Utilities",
            Category::Insurance => "Insurance",
            Category::Healthcare => "Healthcare",
            Category::Savings => "Savings",
            Category::Personal => "Personal",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Category::Custom(_))
    }

    /// Resolves typed text, matching built-in labels regardless of case and
    /// surrounding whitespace.
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        Category::ALL
            .iter()
            .find(|builtin| builtin.label().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Category::Custom(trimmed.to_string()))
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Housing
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::ALL
            .iter()
            .find(|builtin| builtin.label() == value)
            .cloned()
            .unwrap_or(Category::Custom(value))
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Custom(label) => label,
            builtin => builtin.label().to_string(),
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_input_matches_builtins_case_insensitively() {
        assert_eq!(Category::from_input("food"), Category::Food);
        assert_eq!(Category::from_input(" Entertainment "), Category::Entertainment);
        assert_eq!(Category::from_input(" Pets "), Category::Custom("Pets".into()));
    }

    #[test]
    fn stored_labels_round_trip_verbatim() {
        for raw in ["\"food\"", "\" Food \"", "\"Food\""] {
            let category: Category = serde_json::from_str(raw).unwrap();
            assert_eq!(serde_json::to_string(&category).unwrap(), raw);
        }
        assert_eq!(Category::from("food"), Category::Custom("food".into()));
        assert_eq!(Category::from("Food"), Category::Food);
    }

    #[test]
    fn unknown_label_is_kept_as_custom() {
        let category = Category::from("Pets");
        assert_eq!(category, Category::Custom("Pets".into()));
        assert!(!category.is_builtin());
        assert_eq!(category.to_string(), "Pets");
    }

    #[test]
    fn serializes_as_plain_label() {
        let json = serde_json::to_string(&Category::Healthcare).unwrap();
        assert_eq!(json, "\"Healthcare\"");
        let custom: Category = serde_json::from_str("\"Gifts\"").unwrap();
        assert_eq!(custom, Category::Custom("Gifts".into()));
    }
}
