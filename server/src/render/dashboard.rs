use std::fmt::Write as _;

use products_hr::{
    Dashboard, Employee, EmployeeDraft, ExperienceBand, FormMode, SortKey, Summary, ViewPage,
    ViewState,
};
use serde::Deserialize;

use super::{Nav, escape, layout, query_value, rupees};

/// Raw modal form fields; numbers stay text until [`DraftForm::into_draft`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DraftForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_title: String,
    pub department: String,
    pub experience_years: String,
    pub salary: String,
}

impl DraftForm {
    /// Blank or unparsable numbers become 0.
    pub fn into_draft(self) -> EmployeeDraft {
        EmployeeDraft {
            experience_years: self.experience_years.trim().parse().unwrap_or(0),
            salary: self.salary.trim().parse().unwrap_or(0),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role_title: self.role_title,
            department: self.department,
        }
    }
}

pub fn dashboard_page(dashboard: &Dashboard) -> String {
    let page = dashboard.page();
    let mut body = String::from("<h1>Employee Dashboard</h1>");
    body.push_str(&summary_cards(&dashboard.summary()));
    body.push_str(&filter_bar(dashboard.view(), &dashboard.departments()));
    body.push_str(
        "<div class=\"toolbar\"><a class=\"button primary\" href=\"/dashboard/new\">Add Employee</a>\
         <a class=\"button\" href=\"/employees.csv\">Export CSV</a></div>",
    );
    body.push_str(&employee_table(&page));
    body.push_str(&pager(&page));
    if let Some(draft) = dashboard.form_draft() {
        body.push_str(&form_overlay(&dashboard.view().form, &draft));
    }
    layout("Employee Dashboard", Nav::Dashboard, &body)
}

fn summary_cards(summary: &Summary) -> String {
    let cards = [
        ("Total Employees", summary.total_employees.to_string()),
        ("Active Employees", summary.active_employees.to_string()),
        ("Average Salary", rupees(summary.average_salary)),
        ("Departments", summary.departments.to_string()),
    ];
    let mut html = String::from("<section class=\"cards\">");
    for (label, value) in cards {
        let _ = write!(
            html,
            "<div class=\"card\"><div class=\"label\">{label}</div><div class=\"value\">{value}</div></div>"
        );
    }
    html.push_str("</section>");
    html
}

fn option(value: &str, label: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(
        "<option value=\"{}\"{selected}>{}</option>",
        escape(value),
        escape(label)
    )
}

fn filter_bar(view: &ViewState, departments: &[String]) -> String {
    let mut html = String::from(
        "<form class=\"filters\" method=\"get\" action=\"/dashboard/view\"><select name=\"department\">",
    );
    html.push_str(&option("", "All Departments", view.department.is_none()));
    for name in departments {
        html.push_str(&option(name, name, view.department.as_deref() == Some(name.as_str())));
    }
    html.push_str("</select><select name=\"experience\">");
    for band in ExperienceBand::ALL {
        html.push_str(&option(band.as_str(), band.label(), view.experience == band));
    }
    html.push_str("</select><select name=\"sort\">");
    for key in SortKey::ALL {
        html.push_str(&option(key.as_str(), key.label(), view.sort == key));
    }
    let _ = write!(
        html,
        "</select><input type=\"search\" name=\"search\" placeholder=\"Search by name or role\" value=\"{}\">\
         <button class=\"button\" type=\"submit\">Apply</button></form>",
        escape(&view.search)
    );
    html
}

fn employee_row(employee: &Employee) -> String {
    let profile = &employee.profile;
    format!(
        "<tr><td>{name}</td><td>{email}</td><td>{title} ({level})</td><td>{department}</td>\
         <td>{years}</td><td>{salary}</td>\
         <td><a class=\"button\" href=\"/dashboard/edit?id={id}\">Edit</a></td></tr>",
        name = escape(&profile.full_name()),
        email = escape(&profile.email),
        title = escape(&profile.role.title),
        level = escape(&profile.role.level),
        department = escape(&profile.department.name),
        years = profile.experience_years,
        salary = rupees(profile.salary),
        id = escape(&query_value(employee.id.as_str())),
    )
}

fn employee_table(page: &ViewPage<'_>) -> String {
    if page.is_empty() {
        return "<div class=\"empty\">No employees match the current filters.</div>".to_string();
    }
    let mut html = String::from(
        "<table><thead><tr><th>Name</th><th>Email</th><th>Role</th><th>Department</th>\
         <th>Experience (Years)</th><th>Salary</th><th></th></tr></thead><tbody>",
    );
    for employee in &page.rows {
        html.push_str(&employee_row(employee));
    }
    html.push_str("</tbody></table>");
    html
}

fn pager(page: &ViewPage<'_>) -> String {
    if page.is_empty() {
        return String::new();
    }
    let previous = if page.has_previous() {
        format!(
            "<a class=\"button\" href=\"/dashboard/page/{}\">Previous</a>",
            page.page - 1
        )
    } else {
        String::new()
    };
    let next = if page.has_next() {
        format!(
            "<a class=\"button\" href=\"/dashboard/page/{}\">Next</a>",
            page.page + 1
        )
    } else {
        String::new()
    };
    format!(
        "<div class=\"pager\">{previous}<span>Page {} of {}</span>{next}</div>",
        page.page, page.total_pages
    )
}

fn input(label: &str, name: &str, kind: &str, value: &str) -> String {
    format!(
        "<label>{label}<input type=\"{kind}\" name=\"{name}\" value=\"{}\"></label>",
        escape(value)
    )
}

fn form_overlay(mode: &FormMode, draft: &EmployeeDraft) -> String {
    let (title, submit) = match mode {
        FormMode::Editing { .. } => ("Edit Employee", "Update"),
        _ => ("Create Employee", "Create"),
    };
    let fields = [
        input("First Name", "first_name", "text", &draft.first_name),
        input("Last Name", "last_name", "text", &draft.last_name),
        input("Email", "email", "email", &draft.email),
        input("Role", "role_title", "text", &draft.role_title),
        input("Department", "department", "text", &draft.department),
        input(
            "Experience (Years)",
            "experience_years",
            "number",
            &draft.experience_years.to_string(),
        ),
        input("Salary", "salary", "number", &draft.salary.to_string()),
    ];
    format!(
        "<div class=\"overlay\"><div class=\"modal\"><h2>{title}</h2>\
         <form method=\"post\" action=\"/dashboard/form\">{fields}\
         <div class=\"actions\">\
         <button class=\"button\" type=\"submit\" formaction=\"/dashboard/form/cancel\">Cancel</button>\
         <button class=\"button primary\" type=\"submit\">{submit}</button>\
         </div></form></div></div>",
        fields = fields.concat(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use products_hr::{EmployeeId, Intent, RecordStore, seed::mock_store};

    fn mock_dashboard() -> Dashboard {
        Dashboard::new(mock_store())
    }

    #[test]
    fn renders_cards_rows_and_pager() {
        let html = dashboard_page(&mock_dashboard());
        assert!(html.contains("Total Employees</div><div class=\"value\">16"));
        assert!(html.contains("Active Employees</div><div class=\"value\">14"));
        assert!(html.contains("<option value=\"\" selected>All Departments</option>"));
        assert!(html.contains("<td>Backend Engineer (Senior)</td>"));
        assert!(html.contains("<td>₹1,850,000</td>"));
        assert!(html.contains("href=\"/dashboard/edit?id=emp-001\""));
        assert!(html.contains("Page 1 of 2"));
        assert!(html.contains("href=\"/dashboard/page/2\">Next"));
        assert!(!html.contains("Previous"));
        assert!(!html.contains("class=\"overlay\""));
    }

    #[test]
    fn empty_result_hides_table_and_pager() {
        let mut dashboard = mock_dashboard();
        dashboard
            .apply(Intent::SearchChanged("zzzz".into()))
            .unwrap();
        let html = dashboard_page(&dashboard);
        assert!(html.contains("No employees match"));
        assert!(!html.contains("<table>"));
        assert!(!html.contains("class=\"pager\""));
        assert!(html.contains("value=\"zzzz\""));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let mut dashboard = mock_dashboard();
        dashboard
            .apply(Intent::EditRequested(EmployeeId::new("emp-003")))
            .unwrap();
        let html = dashboard_page(&dashboard);
        assert!(html.contains("<h2>Edit Employee</h2>"));
        assert!(html.contains("name=\"first_name\" value=\"Kabir\""));
        assert!(html.contains("name=\"salary\" value=\"850000\""));
        assert!(html.contains(">Update</button>"));
        assert!(html.contains(">Cancel</button>"));
    }

    #[test]
    fn create_form_starts_blank() {
        let mut dashboard = Dashboard::new(RecordStore::default());
        dashboard.apply(Intent::CreateRequested).unwrap();
        let html = dashboard_page(&dashboard);
        assert!(html.contains("<h2>Create Employee</h2>"));
        assert!(html.contains("name=\"first_name\" value=\"\""));
        assert!(html.contains(">Create</button>"));
    }

    #[test]
    fn record_text_is_escaped() {
        let mut dashboard = Dashboard::new(RecordStore::default());
        dashboard.create(
            EmployeeDraft {
                first_name: "<script>".into(),
                ..EmployeeDraft::default()
            }
            .into_profile(),
        );
        let html = dashboard_page(&dashboard);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn lenient_numbers_default_to_zero() {
        let draft = DraftForm {
            first_name: "Asha".into(),
            experience_years: " 4 ".into(),
            salary: "lots".into(),
            ..DraftForm::default()
        }
        .into_draft();
        assert_eq!(draft.experience_years, 4);
        assert_eq!(draft.salary, 0);
        assert_eq!(draft.first_name, "Asha");
    }
}
