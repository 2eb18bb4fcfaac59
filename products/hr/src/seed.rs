//! Built-in mock roster and JSON seed loading.

use chrono::NaiveDate;

use crate::{
    error::{HrError, HrResult},
    model::{Department, Employee, EmployeeId, EmployeeProfile, Role},
    store::RecordStore,
};

struct MockRow {
    id: &'static str,
    first: &'static str,
    last: &'static str,
    title: &'static str,
    level: &'static str,
    department: &'static str,
    years: u32,
    salary: u64,
    location: &'static str,
    started: (i32, u32, u32),
    skills: &'static [&'static str],
    rating: f32,
    active: bool,
}

const DEPARTMENTS: [(&str, &str, &str); 5] = [
    ("d-eng", "Engineering", "Builds and runs the product"),
    ("d-design", "Design", "Product and brand design"),
    ("d-sales", "Sales", "Revenue and partnerships"),
    ("d-hr", "Human Resources", "People operations"),
    ("d-fin", "Finance", "Accounting and payroll"),
];

#[rustfmt::skip]
const ROWS: [MockRow; 16] = [
    MockRow { id: "emp-001", first: "Aarav", last: "Sharma", title: "Backend Engineer", level: "Senior", department: "Engineering", years: 7, salary: 1_850_000, location: "Bengaluru", started: (2018, 4, 2), skills: &["Rust", "PostgreSQL"], rating: 4.6, active: true },
    MockRow { id: "emp-002", first: "Diya", last: "Patel", title: "Frontend Engineer", level: "Mid", department: "Engineering", years: 4, salary: 1_100_000, location: "Pune", started: (2021, 1, 11), skills: &["TypeScript", "React"], rating: 4.2, active: true },
    MockRow { id: "emp-003", first: "Kabir", last: "Mehta", title: "Product Designer", level: "Mid", department: "Design", years: 3, salary: 850_000, location: "Mumbai", started: (2022, 6, 20), skills: &["Figma", "Prototyping"], rating: 4.0, active: true },
    MockRow { id: "emp-004", first: "Ananya", last: "Iyer", title: "Account Executive", level: "Junior", department: "Sales", years: 1, salary: 420_000, location: "Chennai", started: (2024, 2, 5), skills: &["Negotiation"], rating: 3.8, active: true },
    MockRow { id: "emp-005", first: "Vivaan", last: "Reddy", title: "HR Generalist", level: "Mid", department: "Human Resources", years: 5, salary: 600_000, location: "Hyderabad", started: (2020, 9, 14), skills: &["Recruiting", "Onboarding"], rating: 4.1, active: true },
    MockRow { id: "emp-006", first: "Ishaan", last: "Gupta", title: "Financial Analyst", level: "Junior", department: "Finance", years: 2, salary: 300_000, location: "Delhi", started: (2023, 3, 1), skills: &["Excel", "Forecasting"], rating: 3.9, active: true },
    MockRow { id: "emp-007", first: "Saanvi", last: "Nair", title: "DevOps Engineer", level: "Senior", department: "Engineering", years: 8, salary: 2_100_000, location: "Bengaluru", started: (2017, 7, 17), skills: &["Kubernetes", "Terraform"], rating: 4.7, active: true },
    MockRow { id: "emp-008", first: "Arjun", last: "Singh", title: "Sales Manager", level: "Lead", department: "Sales", years: 9, salary: 1_500_000, location: "Delhi", started: (2016, 11, 28), skills: &["Forecasting", "Coaching"], rating: 4.4, active: true },
    MockRow { id: "emp-009", first: "Myra", last: "Kapoor", title: "UX Researcher", level: "Junior", department: "Design", years: 0, salary: 300_001, location: "Mumbai", started: (2025, 1, 6), skills: &["Interviews"], rating: 3.5, active: true },
    MockRow { id: "emp-010", first: "Reyansh", last: "Joshi", title: "QA Engineer", level: "Mid", department: "Engineering", years: 3, salary: 780_000, location: "Pune", started: (2022, 8, 22), skills: &["Playwright", "Rust"], rating: 3.9, active: false },
    MockRow { id: "emp-011", first: "Aditi", last: "Verma", title: "Payroll Specialist", level: "Mid", department: "Finance", years: 6, salary: 720_000, location: "Jaipur", started: (2019, 5, 13), skills: &["Payroll", "Compliance"], rating: 4.3, active: true },
    MockRow { id: "emp-012", first: "Vihaan", last: "Das", title: "Data Engineer", level: "Senior", department: "Engineering", years: 6, salary: 1_000_000, location: "Kolkata", started: (2019, 10, 7), skills: &["Spark", "SQL"], rating: 4.1, active: true },
    MockRow { id: "emp-013", first: "Kiara", last: "Bose", title: "Talent Partner", level: "Junior", department: "Human Resources", years: 2, salary: 380_000, location: "Kolkata", started: (2023, 7, 3), skills: &["Sourcing"], rating: 3.7, active: true },
    MockRow { id: "emp-014", first: "Rohan", last: "Kulkarni", title: "Engineering Manager", level: "Lead", department: "Engineering", years: 12, salary: 3_200_000, location: "Bengaluru", started: (2013, 2, 18), skills: &["Leadership", "Rust"], rating: 4.8, active: true },
    MockRow { id: "emp-015", first: "Anika", last: "Menon", title: "Brand Designer", level: "Senior", department: "Design", years: 6, salary: 1_000_001, location: "Kochi", started: (2019, 12, 2), skills: &["Illustration", "Branding"], rating: 4.5, active: false },
    MockRow { id: "emp-016", first: "Dhruv", last: "Chopra", title: "Sales Development Rep", level: "Junior", department: "Sales", years: 1, salary: 350_000, location: "Chandigarh", started: (2024, 6, 10), skills: &["Prospecting"], rating: 3.6, active: true },
];

fn department(name: &str) -> Department {
    DEPARTMENTS
        .iter()
        .find(|(_, dept, _)| *dept == name)
        .map(|(id, name, description)| Department {
            id: (*id).to_string(),
            name: (*name).to_string(),
            description: (*description).to_string(),
        })
        .unwrap_or_else(|| Department {
            name: name.to_string(),
            ..Department::default()
        })
}

impl MockRow {
    fn to_employee(&self) -> Employee {
        let (year, month, day) = self.started;
        Employee::new(
            EmployeeId::new(self.id),
            EmployeeProfile {
                first_name: self.first.to_string(),
                last_name: self.last.to_string(),
                email: format!(
                    "{}.{}@company.test",
                    self.first.to_lowercase(),
                    self.last.to_lowercase()
                ),
                role: Role {
                    id: format!("r-{}", self.id),
                    title: self.title.to_string(),
                    level: self.level.to_string(),
                },
                department: department(self.department),
                experience_years: self.years,
                specialization: vec![self.title.to_string()],
                salary: self.salary,
                location: self.location.to_string(),
                start_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
                skills: self.skills.iter().map(|s| s.to_string()).collect(),
                performance_rating: self.rating,
                is_active: self.active,
            },
        )
    }
}

/// The fixed mock roster every session starts from.
pub fn mock_employees() -> Vec<Employee> {
    ROWS.iter().map(MockRow::to_employee).collect()
}

pub fn mock_store() -> RecordStore {
    // Mock ids are distinct literals.
    RecordStore::from_records(mock_employees()).unwrap_or_default()
}

/// Parse a JSON array of employee records into a store.
pub fn store_from_json(raw: &str) -> HrResult<RecordStore> {
    let records: Vec<Employee> =
        serde_json::from_str(raw).map_err(|err| HrError::InvalidSeed(err.to_string()))?;
    RecordStore::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_roster_is_complete() {
        let store = mock_store();
        assert_eq!(store.len(), ROWS.len());
        assert!(store.get(&"emp-014".into()).is_some());
    }

    #[test]
    fn json_seed_accepts_minimal_records() {
        let raw = r#"[
            {
                "id": "x1",
                "firstName": "Lena",
                "lastName": "Roy",
                "email": "lena@x.test",
                "role": { "title": "Intern" },
                "department": { "name": "Ops" },
                "experienceYears": 0,
                "salary": 120000,
                "startDate": "2025-03-01"
            }
        ]"#;
        let store = store_from_json(raw).unwrap();
        let lena = store.get(&"x1".into()).unwrap();
        assert!(lena.profile.is_active);
        assert_eq!(lena.profile.department.name, "Ops");
        assert!(lena.profile.skills.is_empty());
    }

    #[test]
    fn json_seed_rejects_negative_salary() {
        let raw = r#"[{"id":"x","firstName":"A","lastName":"B","email":"","role":{"title":""},
            "department":{"name":""},"experienceYears":1,"salary":-5,"startDate":"2025-01-01"}]"#;
        assert!(matches!(store_from_json(raw), Err(HrError::InvalidSeed(_))));
    }

    #[test]
    fn json_seed_rejects_duplicate_ids() {
        let one = serde_json::to_value(&mock_employees()[0]).unwrap();
        let raw = serde_json::to_string(&vec![one.clone(), one]).unwrap();
        assert!(matches!(
            store_from_json(&raw),
            Err(HrError::DuplicateEmployee(_))
        ));
    }
}
