use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque employee identifier, unique within a record store.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Fresh random identifier for newly created records.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub level: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Every attribute of an employee except the identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub department: Department,
    pub experience_years: u32,
    #[serde(default)]
    pub specialization: Vec<String>,
    pub salary: u64,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub performance_rating: f32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for EmployeeProfile {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            role: Role::default(),
            department: Department::default(),
            experience_years: 0,
            specialization: Vec::new(),
            salary: 0,
            location: String::new(),
            start_date: NaiveDate::default(),
            skills: Vec::new(),
            performance_rating: 0.0,
            is_active: true,
        }
    }
}

impl EmployeeProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(flatten)]
    pub profile: EmployeeProfile,
}

impl Employee {
    pub fn new(id: EmployeeId, profile: EmployeeProfile) -> Self {
        Self { id, profile }
    }

    pub fn full_name(&self) -> String {
        self.profile.full_name()
    }

    pub fn department_name(&self) -> &str {
        &self.profile.department.name
    }
}

/// The fields the edit form exposes. Everything else on a profile is carried
/// over from the record being edited (or defaulted for a new one).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_title: String,
    pub department: String,
    pub experience_years: u32,
    pub salary: u64,
}

impl EmployeeDraft {
    pub fn from_profile(profile: &EmployeeProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            role_title: profile.role.title.clone(),
            department: profile.department.name.clone(),
            experience_years: profile.experience_years,
            salary: profile.salary,
        }
    }

    /// Overlay the draft onto `base`, leaving non-form attributes untouched.
    pub fn apply_to(self, mut base: EmployeeProfile) -> EmployeeProfile {
        base.first_name = self.first_name;
        base.last_name = self.last_name;
        base.email = self.email;
        base.role.title = self.role_title;
        base.department.name = self.department;
        base.experience_years = self.experience_years;
        base.salary = self.salary;
        base
    }

    pub fn into_profile(self) -> EmployeeProfile {
        self.apply_to(EmployeeProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_profiles_default_to_active() {
        let profile = EmployeeDraft::default().into_profile();
        assert!(profile.is_active);
    }

    #[test]
    fn draft_keeps_non_form_attributes() {
        let base = EmployeeProfile {
            role: Role {
                id: "r1".into(),
                title: "Engineer".into(),
                level: "Senior".into(),
            },
            skills: vec!["rust".into()],
            is_active: false,
            ..EmployeeProfile::default()
        };
        let draft = EmployeeDraft {
            first_name: "Asha".into(),
            role_title: "Staff Engineer".into(),
            salary: 900_000,
            ..EmployeeDraft::default()
        };
        let merged = draft.apply_to(base);
        assert_eq!(merged.first_name, "Asha");
        assert_eq!(merged.role.title, "Staff Engineer");
        assert_eq!(merged.role.level, "Senior");
        assert_eq!(merged.skills, vec!["rust".to_string()]);
        assert!(!merged.is_active);
        assert_eq!(merged.salary, 900_000);
    }

    #[test]
    fn employee_serializes_flat_camel_case() {
        let employee = Employee::new(
            EmployeeId::new("emp-1"),
            EmployeeProfile {
                first_name: "Ravi".into(),
                experience_years: 4,
                ..EmployeeProfile::default()
            },
        );
        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["id"], json!("emp-1"));
        assert_eq!(value["firstName"], json!("Ravi"));
        assert_eq!(value["experienceYears"], json!(4));
        assert_eq!(value["isActive"], json!(true));
    }
}
