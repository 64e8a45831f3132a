use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of labels a register row can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Receipt,
    Legal,
    #[serde(rename = "VCAT Document")]
    VcatDocument,
    #[serde(rename = "Court Order")]
    CourtOrder,
    Notice,
    Maintenance,
    Payment,
    Exhibit,
    Medical,
    #[default]
    Document,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Receipt,
        Category::Legal,
        Category::VcatDocument,
        Category::CourtOrder,
        Category::Notice,
        Category::Maintenance,
        Category::Payment,
        Category::Exhibit,
        Category::Medical,
        Category::Document,
    ];

    /// Label as written to the `file_category` column
    pub fn label(self) -> &'static str {
        match self {
            Category::Receipt => "Receipt",
            Category::Legal => "Legal",
            Category::VcatDocument => "VCAT Document",
            Category::CourtOrder => "Court Order",
            Category::Notice => "Notice",
            Category::Maintenance => "Maintenance",
            Category::Payment => "Payment",
            Category::Exhibit => "Exhibit",
            Category::Medical => "Medical",
            Category::Document => "Document",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}
