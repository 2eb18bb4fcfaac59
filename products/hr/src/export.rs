//! CSV export of the visible page.
//!
//! Fields are joined with bare commas and are not quoted, so free text that
//! contains a comma or a quote will shift columns in the output.

use crate::model::Employee;

pub const CSV_FILENAME: &str = "employees.csv";
pub const CSV_HEADER: &str = "Name,Email,Role,Department,Experience,Salary";

pub fn csv_row(employee: &Employee) -> String {
    let profile = &employee.profile;
    [
        profile.full_name(),
        profile.email.clone(),
        profile.role.title.clone(),
        profile.department.name.clone(),
        profile.experience_years.to_string(),
        profile.salary.to_string(),
    ]
    .join(",")
}

/// Header line followed by one line per row, joined with `\n`.
pub fn export_csv(rows: &[&Employee]) -> String {
    std::iter::once(CSV_HEADER.to_string())
        .chain(rows.iter().map(|employee| csv_row(employee)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Department, EmployeeProfile, Role};

    fn employee() -> Employee {
        Employee::new(
            "e1".into(),
            EmployeeProfile {
                first_name: "Priya".into(),
                last_name: "Nair".into(),
                email: "priya@corp.test".into(),
                role: Role {
                    title: "Analyst".into(),
                    level: "L2".into(),
                    ..Role::default()
                },
                department: Department {
                    name: "Finance".into(),
                    ..Department::default()
                },
                experience_years: 4,
                salary: 650_000,
                ..EmployeeProfile::default()
            },
        )
    }

    #[test]
    fn header_only_for_empty_page() {
        assert_eq!(export_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn rows_follow_header() {
        let one = employee();
        let csv = export_csv(&[&one, &one]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "Priya Nair,priya@corp.test,Analyst,Finance,4,650000");
    }

    #[test]
    fn embedded_commas_are_not_escaped() {
        let mut odd = employee();
        odd.profile.role.title = "Lead, Payroll".into();
        assert_eq!(
            csv_row(&odd),
            "Priya Nair,priya@corp.test,Lead, Payroll,Finance,4,650000"
        );
    }
}
