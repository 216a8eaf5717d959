pub mod controller;
pub mod dataset;
pub mod filter;
pub mod normalize;
pub mod paginate;
pub mod source;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use controller::{QueryController, QueryState, ResultState};
pub use dataset::{academic_units, faculty_members, Dataset, DatasetError};
pub use filter::filter;
pub use paginate::{page_links, paginate, PageLabel, PageLink, PageWindow, DEFAULT_PAGE_SIZE, MAX_PAGE_LINKS};

/// A record the filter engine can search and, optionally, categorise.
pub trait Searchable {
    type Category: Copy + Eq + fmt::Debug;

    /// Whether records of this shape carry a category tag at all.
    const SUPPORTS_CATEGORIES: bool = false;

    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn category(&self) -> Option<Self::Category> {
        None
    }
    /// Fields the search term is matched against, in display order.
    fn searchable_fields(&self) -> Vec<&str>;
}

/// Category type for record shapes that are never categorised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uncategorized {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    Department,
    ResearchCenter,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 2] = [UnitCategory::Department, UnitCategory::ResearchCenter];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Department => "department",
            UnitCategory::ResearchCenter => "research_center",
        }
    }

    /// Tab label shown above the academics listing.
    pub fn label(&self) -> &'static str {
        match self {
            UnitCategory::Department => "Engineering Departments",
            UnitCategory::ResearchCenter => "Research Centers",
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category `{0}`")]
pub struct ParseCategoryError(pub String);

impl FromStr for UnitCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Category restriction of a query. `All` lets every record through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CategoryFilter<C> {
    All,
    Only(C),
}

impl<C> Default for CategoryFilter<C> {
    fn default() -> Self {
        CategoryFilter::All
    }
}

impl<C: PartialEq> CategoryFilter<C> {
    pub fn admits(&self, category: Option<&C>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted),
        }
    }
}

impl CategoryFilter<UnitCategory> {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Programs",
            CategoryFilter::Only(c) => c.label(),
        }
    }
}

impl<C: FromStr<Err = ParseCategoryError>> FromStr for CategoryFilter<C> {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Where an academic unit's labs link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabsLink<'a> {
    External(&'a str),
    Internal(&'a str),
}

/// A department or research center listed on the academics hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicUnit {
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub key_research_areas: Vec<String>,
    pub labs_url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Overrides the default `/academics-hub/{slug}` page path.
    #[serde(default)]
    pub department_page_path: Option<String>,
    #[serde(default)]
    pub category: Option<UnitCategory>,
}

impl AcademicUnit {
    pub fn page_path(&self) -> String {
        match &self.department_page_path {
            Some(path) => path.clone(),
            None => format!("/academics-hub/{}", self.slug),
        }
    }

    pub fn labs_link(&self) -> LabsLink<'_> {
        if self.labs_url.starts_with("http://") || self.labs_url.starts_with("https://") {
            LabsLink::External(&self.labs_url)
        } else {
            LabsLink::Internal(&self.labs_url)
        }
    }
}

impl Searchable for AcademicUnit {
    type Category = UnitCategory;
    const SUPPORTS_CATEGORIES: bool = true;

    fn id(&self) -> &str { &self.slug }
    fn display_name(&self) -> &str { &self.name }
    fn category(&self) -> Option<UnitCategory> { self.category }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.description.as_str()];
        fields.extend(self.key_research_areas.iter().map(String::as_str));
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyMember {
    pub id: String,
    pub photo_url: String,
    pub name: String,
    pub title: String,
    pub department: String,
    #[serde(default)]
    pub research_interests: Vec<String>,
}

impl FacultyMember {
    /// Anchor link into the directory, e.g. `/faculty-directory#dr-ada-lovelace`.
    pub fn profile_anchor(&self) -> String {
        let slug = self.id.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-");
        format!("/faculty-directory#{slug}")
    }
}

impl Searchable for FacultyMember {
    type Category = Uncategorized;

    fn id(&self) -> &str { &self.id }
    fn display_name(&self) -> &str { &self.name }

    // title is displayed only, never matched
    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.department.as_str()];
        fields.extend(self.research_interests.iter().map(String::as_str));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(slug: &str, labs_url: &str) -> AcademicUnit {
        AcademicUnit {
            slug: slug.into(),
            name: "Dept".into(),
            description: "desc".into(),
            key_research_areas: vec!["Area".into()],
            labs_url: labs_url.into(),
            image_url: None,
            department_page_path: None,
            category: Some(UnitCategory::Department),
        }
    }

    #[test]
    fn page_path_defaults_to_slug() {
        let mut u = unit("computer-science", "/labs");
        assert_eq!(u.page_path(), "/academics-hub/computer-science");
        u.department_page_path = Some("/cs".into());
        assert_eq!(u.page_path(), "/cs");
    }

    #[test]
    fn labs_link_detects_external_urls() {
        assert_eq!(unit("a", "https://lab.example.org").labs_link(), LabsLink::External("https://lab.example.org"));
        assert_eq!(unit("a", "/research/labs").labs_link(), LabsLink::Internal("/research/labs"));
    }

    #[test]
    fn profile_anchor_collapses_whitespace() {
        let m = FacultyMember {
            id: "Dr  Ada\tLovelace".into(),
            photo_url: String::new(),
            name: "Ada".into(),
            title: "Professor".into(),
            department: "Math".into(),
            research_interests: vec![],
        };
        assert_eq!(m.profile_anchor(), "/faculty-directory#dr-ada-lovelace");
    }

    #[test]
    fn category_filter_parses() {
        assert_eq!("all".parse::<CategoryFilter<UnitCategory>>(), Ok(CategoryFilter::All));
        assert_eq!(
            "research_center".parse::<CategoryFilter<UnitCategory>>(),
            Ok(CategoryFilter::Only(UnitCategory::ResearchCenter))
        );
        assert!("labs".parse::<CategoryFilter<UnitCategory>>().is_err());
    }

    #[test]
    fn academic_fields_are_name_description_then_areas() {
        let u = unit("a", "/labs");
        assert_eq!(u.searchable_fields(), vec!["Dept", "desc", "Area"]);
    }
}
