use async_graphql::{Enum, ID, InputObject, SimpleObject};
use chrono::NaiveDate;
use products_hr::{
    ChartData, Dashboard, Department, Employee, EmployeeDraft, EmployeeProfile, ExperienceBand,
    FormMode, Role, SalaryBucket, SortKey, Summary,
};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "ExperienceBand")]
pub enum ExperienceBandGql {
    /// No experience filter.
    #[graphql(name = "ANY")]
    Any,
    /// 0 to 2 years.
    #[graphql(name = "JUNIOR")]
    Junior,
    /// 3 to 5 years.
    #[graphql(name = "MID")]
    Mid,
    /// 6 years or more.
    #[graphql(name = "SENIOR")]
    Senior,
}

impl From<ExperienceBand> for ExperienceBandGql {
    fn from(value: ExperienceBand) -> Self {
        match value {
            ExperienceBand::Any => Self::Any,
            ExperienceBand::Junior => Self::Junior,
            ExperienceBand::Mid => Self::Mid,
            ExperienceBand::Senior => Self::Senior,
        }
    }
}

impl From<ExperienceBandGql> for ExperienceBand {
    fn from(value: ExperienceBandGql) -> Self {
        match value {
            ExperienceBandGql::Any => Self::Any,
            ExperienceBandGql::Junior => Self::Junior,
            ExperienceBandGql::Mid => Self::Mid,
            ExperienceBandGql::Senior => Self::Senior,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "SortKey")]
pub enum SortKeyGql {
    #[graphql(name = "NAME")]
    Name,
    #[graphql(name = "EXPERIENCE")]
    Experience,
    #[graphql(name = "SALARY")]
    Salary,
}

impl From<SortKey> for SortKeyGql {
    fn from(value: SortKey) -> Self {
        match value {
            SortKey::Name => Self::Name,
            SortKey::Experience => Self::Experience,
            SortKey::Salary => Self::Salary,
        }
    }
}

impl From<SortKeyGql> for SortKey {
    fn from(value: SortKeyGql) -> Self {
        match value {
            SortKeyGql::Name => Self::Name,
            SortKeyGql::Experience => Self::Experience,
            SortKeyGql::Salary => Self::Salary,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum FormModeKind {
    #[graphql(name = "CLOSED")]
    Closed,
    #[graphql(name = "CREATING")]
    Creating,
    #[graphql(name = "EDITING")]
    Editing,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Role")]
pub struct RoleNode {
    pub id: String,
    pub title: String,
    pub level: String,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Department")]
pub struct DepartmentNode {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Employee")]
pub struct EmployeeNode {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub role: RoleNode,
    pub department: DepartmentNode,
    pub experience_years: u32,
    pub specialization: Vec<String>,
    pub salary: u64,
    pub location: String,
    pub start_date: NaiveDate,
    pub skills: Vec<String>,
    pub performance_rating: f32,
    pub is_active: bool,
}

impl From<&Employee> for EmployeeNode {
    fn from(employee: &Employee) -> Self {
        let profile = employee.profile.clone();
        Self {
            id: ID(employee.id.to_string()),
            full_name: profile.full_name(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            role: RoleNode {
                id: profile.role.id,
                title: profile.role.title,
                level: profile.role.level,
            },
            department: DepartmentNode {
                id: profile.department.id,
                name: profile.department.name,
                description: profile.department.description,
            },
            experience_years: profile.experience_years,
            specialization: profile.specialization,
            salary: profile.salary,
            location: profile.location,
            start_date: profile.start_date,
            skills: profile.skills,
            performance_rating: profile.performance_rating,
            is_active: profile.is_active,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "EmployeeDraft")]
pub struct DraftNode {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_title: String,
    pub department: String,
    pub experience_years: u32,
    pub salary: u64,
}

impl From<EmployeeDraft> for DraftNode {
    fn from(draft: EmployeeDraft) -> Self {
        Self {
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            role_title: draft.role_title,
            department: draft.department,
            experience_years: draft.experience_years,
            salary: draft.salary,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "EmployeeForm")]
pub struct FormNode {
    pub open: bool,
    pub mode: FormModeKind,
    pub editing_id: Option<ID>,
    /// Prefill values while the form is open.
    pub draft: Option<DraftNode>,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "ViewState")]
pub struct ViewStateNode {
    pub department: Option<String>,
    pub experience: ExperienceBandGql,
    pub sort: SortKeyGql,
    pub search: String,
    pub page: u32,
    pub form: FormNode,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Summary")]
pub struct SummaryNode {
    pub total_employees: i32,
    pub active_employees: i32,
    pub average_salary: u64,
    pub departments: i32,
}

impl From<Summary> for SummaryNode {
    fn from(summary: Summary) -> Self {
        Self {
            total_employees: summary.total_employees as i32,
            active_employees: summary.active_employees as i32,
            average_salary: summary.average_salary,
            departments: summary.departments as i32,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct DashboardPayload {
    pub view: ViewStateNode,
    pub employees: Vec<EmployeeNode>,
    pub filtered_count: i32,
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: i32,
    pub is_empty: bool,
    pub departments: Vec<String>,
    pub summary: SummaryNode,
}

impl DashboardPayload {
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        let state = dashboard.view();
        let page = dashboard.page();
        let form = FormNode {
            open: state.form.is_open(),
            mode: match &state.form {
                FormMode::Closed => FormModeKind::Closed,
                FormMode::Creating => FormModeKind::Creating,
                FormMode::Editing { .. } => FormModeKind::Editing,
            },
            editing_id: state.form.editing().map(|id| ID(id.to_string())),
            draft: dashboard.form_draft().map(DraftNode::from),
        };
        Self {
            view: ViewStateNode {
                department: state.department.clone(),
                experience: state.experience.into(),
                sort: state.sort.into(),
                search: state.search.clone(),
                page: page.page,
                form,
            },
            employees: page.rows.iter().map(|employee| (*employee).into()).collect(),
            filtered_count: page.filtered as i32,
            total_pages: page.total_pages,
            current_page: page.page,
            page_size: page.page_size as i32,
            is_empty: page.is_empty(),
            departments: dashboard.departments(),
            summary: dashboard.summary().into(),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "DepartmentShare")]
pub struct DepartmentShareNode {
    pub name: String,
    pub count: i32,
    pub color: String,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "SalaryBucketCount")]
pub struct SalaryBucketNode {
    pub label: String,
    pub min: u64,
    /// Absent for the open-ended top bucket.
    pub max: Option<u64>,
    pub count: i32,
}

impl SalaryBucketNode {
    fn new(bucket: SalaryBucket, count: usize) -> Self {
        let (min, max) = bucket.range();
        Self {
            label: bucket.label().to_string(),
            min,
            max,
            count: count as i32,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "DepartmentAverageSalary")]
pub struct DepartmentAverageNode {
    pub name: String,
    pub average_salary: u64,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct ChartsPayload {
    pub department_distribution: Vec<DepartmentShareNode>,
    pub salary_histogram: Vec<SalaryBucketNode>,
    pub average_salary_by_department: Vec<DepartmentAverageNode>,
}

impl From<ChartData> for ChartsPayload {
    fn from(data: ChartData) -> Self {
        Self {
            department_distribution: data
                .department_distribution
                .into_iter()
                .map(|share| DepartmentShareNode {
                    name: share.name,
                    count: share.count as i32,
                    color: share.color.to_string(),
                })
                .collect(),
            salary_histogram: data
                .salary_histogram
                .into_iter()
                .map(|entry| SalaryBucketNode::new(entry.bucket, entry.count))
                .collect(),
            average_salary_by_department: data
                .average_salary_by_department
                .into_iter()
                .map(|entry| DepartmentAverageNode {
                    name: entry.name,
                    average_salary: entry.average,
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    /// Data rows, header excluded.
    pub rows: i32,
}

#[derive(Clone, Debug, InputObject)]
pub struct RoleInput {
    pub title: String,
    #[graphql(default)]
    pub level: String,
}

#[derive(Clone, Debug, InputObject)]
pub struct DepartmentInput {
    pub name: String,
    #[graphql(default)]
    pub description: String,
}

#[derive(Clone, Debug, InputObject)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: RoleInput,
    pub department: DepartmentInput,
    pub experience_years: u32,
    pub salary: u64,
    #[graphql(default)]
    pub specialization: Vec<String>,
    #[graphql(default)]
    pub location: String,
    pub start_date: Option<NaiveDate>,
    #[graphql(default)]
    pub skills: Vec<String>,
    #[graphql(default)]
    pub performance_rating: f32,
    #[graphql(default = true)]
    pub is_active: bool,
}

impl EmployeeInput {
    /// Full profile; ids on role/department are kept from `base` when it is given.
    pub fn into_profile(self, base: Option<&EmployeeProfile>) -> EmployeeProfile {
        let (role_id, department_id, start_date) = match base {
            Some(existing) => (
                existing.role.id.clone(),
                existing.department.id.clone(),
                existing.start_date,
            ),
            None => (String::new(), String::new(), NaiveDate::default()),
        };
        EmployeeProfile {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role: Role {
                id: role_id,
                title: self.role.title,
                level: self.role.level,
            },
            department: Department {
                id: department_id,
                name: self.department.name,
                description: self.department.description,
            },
            experience_years: self.experience_years,
            specialization: self.specialization,
            salary: self.salary,
            location: self.location,
            start_date: self.start_date.unwrap_or(start_date),
            skills: self.skills,
            performance_rating: self.performance_rating,
            is_active: self.is_active,
        }
    }
}

#[derive(Clone, Debug, Default, InputObject)]
pub struct DraftInput {
    #[graphql(default)]
    pub first_name: String,
    #[graphql(default)]
    pub last_name: String,
    #[graphql(default)]
    pub email: String,
    #[graphql(default)]
    pub role_title: String,
    #[graphql(default)]
    pub department: String,
    #[graphql(default)]
    pub experience_years: u32,
    #[graphql(default)]
    pub salary: u64,
}

impl From<DraftInput> for EmployeeDraft {
    fn from(input: DraftInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            role_title: input.role_title,
            department: input.department,
            experience_years: input.experience_years,
            salary: input.salary,
        }
    }
}
