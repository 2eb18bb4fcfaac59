//! Derived-view pipeline: search, department, experience band, sort, paginate.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::HrError,
    model::{Employee, EmployeeId},
};

pub const PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ExperienceBand {
    #[default]
    #[serde(rename = "")]
    Any,
    #[serde(rename = "0-2")]
    Junior,
    #[serde(rename = "3-5")]
    Mid,
    #[serde(rename = "6+")]
    Senior,
}

impl ExperienceBand {
    pub const ALL: [ExperienceBand; 4] = [
        ExperienceBand::Any,
        ExperienceBand::Junior,
        ExperienceBand::Mid,
        ExperienceBand::Senior,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceBand::Any => "",
            ExperienceBand::Junior => "0-2",
            ExperienceBand::Mid => "3-5",
            ExperienceBand::Senior => "6+",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceBand::Any => "All Experience Levels",
            ExperienceBand::Junior => "0–2 years",
            ExperienceBand::Mid => "3–5 years",
            ExperienceBand::Senior => "6+ years",
        }
    }

    pub fn contains(self, years: u32) -> bool {
        match self {
            ExperienceBand::Any => true,
            ExperienceBand::Junior => years <= 2,
            ExperienceBand::Mid => (3..=5).contains(&years),
            ExperienceBand::Senior => years >= 6,
        }
    }
}

impl FromStr for ExperienceBand {
    type Err = HrError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" => Ok(ExperienceBand::Any),
            "0-2" => Ok(ExperienceBand::Junior),
            "3-5" => Ok(ExperienceBand::Mid),
            "6+" => Ok(ExperienceBand::Senior),
            other => Err(HrError::UnknownExperienceBand(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Experience,
    Salary,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Experience, SortKey::Salary];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Experience => "experience",
            SortKey::Salary => "salary",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Sort by Name",
            SortKey::Experience => "Sort by Experience",
            SortKey::Salary => "Sort by Salary",
        }
    }

    fn sort(self, rows: &mut [&Employee]) {
        // slice::sort_by is stable; equal keys keep their filtered order.
        match self {
            SortKey::Name => rows.sort_by(|a, b| a.profile.first_name.cmp(&b.profile.first_name)),
            SortKey::Experience => {
                rows.sort_by(|a, b| b.profile.experience_years.cmp(&a.profile.experience_years))
            }
            SortKey::Salary => rows.sort_by(|a, b| b.profile.salary.cmp(&a.profile.salary)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = HrError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" | "name" => Ok(SortKey::Name),
            "experience" => Ok(SortKey::Experience),
            "salary" => Ok(SortKey::Salary),
            other => Err(HrError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Whether the create/edit overlay is open, and for which record.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum FormMode {
    #[default]
    Closed,
    Creating,
    Editing { id: EmployeeId },
}

impl FormMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormMode::Closed)
    }

    pub fn editing(&self) -> Option<&EmployeeId> {
        match self {
            FormMode::Editing { id } => Some(id),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    pub department: Option<String>,
    pub experience: ExperienceBand,
    pub sort: SortKey,
    pub search: String,
    pub page: u32,
    pub form: FormMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            department: None,
            experience: ExperienceBand::Any,
            sort: SortKey::Name,
            search: String::new(),
            page: 1,
            form: FormMode::Closed,
        }
    }
}

impl ViewState {
    pub fn search_term(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

struct Predicates<'s> {
    needle: Option<String>,
    department: Option<&'s str>,
    experience: ExperienceBand,
}

impl<'s> Predicates<'s> {
    fn new(state: &'s ViewState) -> Self {
        Self {
            needle: state.search_term().map(str::to_lowercase),
            department: state.department.as_deref(),
            experience: state.experience,
        }
    }

    fn matches(&self, employee: &Employee) -> bool {
        let profile = &employee.profile;
        if let Some(needle) = &self.needle {
            let name_hit = profile.full_name().to_lowercase().contains(needle.as_str());
            let role_hit = profile.role.title.to_lowercase().contains(needle.as_str());
            if !name_hit && !role_hit {
                return false;
            }
        }
        if let Some(department) = self.department {
            if profile.department.name != department {
                return false;
            }
        }
        self.experience.contains(profile.experience_years)
    }
}

/// One rendered page of the filtered, sorted record list.
#[derive(Clone, Debug)]
pub struct ViewPage<'a> {
    pub rows: Vec<&'a Employee>,
    pub filtered: usize,
    pub total_pages: u32,
    pub page: u32,
    pub page_size: usize,
}

impl ViewPage<'_> {
    /// Nothing matched the active predicates.
    pub fn is_empty(&self) -> bool {
        self.filtered == 0
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub fn total_pages(filtered: usize, page_size: usize) -> u32 {
    filtered.div_ceil(page_size) as u32
}

/// Clamp a requested page into `[1, max(1, total_pages)]`.
pub fn clamp_page(requested: u32, total_pages: u32) -> u32 {
    requested.clamp(1, total_pages.max(1))
}

pub fn derive_view<'a>(records: &'a [Employee], state: &ViewState) -> ViewPage<'a> {
    let predicates = Predicates::new(state);
    let mut matched: Vec<&Employee> = records
        .iter()
        .filter(|employee| predicates.matches(employee))
        .collect();
    state.sort.sort(&mut matched);

    let filtered = matched.len();
    let total_pages = total_pages(filtered, PAGE_SIZE);
    let page = clamp_page(state.page, total_pages);
    let start = (page as usize - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(filtered);
    let rows = if start < filtered {
        matched[start..end].to_vec()
    } else {
        Vec::new()
    };
    debug!(
        filtered,
        total_pages,
        page,
        sort = state.sort.as_str(),
        "derived employee view"
    );
    ViewPage {
        rows,
        filtered,
        total_pages,
        page,
        page_size: PAGE_SIZE,
    }
}

/// Distinct department names in first-occurrence order, for the filter drop-down.
pub fn department_names(records: &[Employee]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for employee in records {
        let name = employee.department_name();
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}
