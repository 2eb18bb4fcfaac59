use std::sync::Arc;

use async_graphql::{Context, ID, Object};
use platform_api::{ApiError, into_graphql};
use products_hr::{Dashboard, EmployeeId, HrError, Intent};
use tracing::info_span;

use super::types::{
    ChartsPayload, CsvExport, DashboardPayload, DraftInput, EmployeeInput, EmployeeNode,
    ExperienceBandGql, SortKeyGql,
};
use crate::session::{SessionId, SessionRegistry};

#[derive(Default)]
pub struct HrQuery;

#[derive(Default)]
pub struct HrMutation;

#[Object]
impl HrQuery {
    /// Current page of the caller's dashboard.
    async fn dashboard(&self, ctx: &Context<'_>) -> async_graphql::Result<DashboardPayload> {
        with_dashboard(ctx, |dashboard| {
            let view = dashboard.view();
            let span = info_span!(
                "hr.dashboard",
                department = view.department.as_deref().unwrap_or(""),
                experience = view.experience.as_str(),
                sort = view.sort.as_str(),
                has_search = view.search_term().is_some(),
                page = view.page,
            );
            let _guard = span.enter();
            Ok(DashboardPayload::from_dashboard(dashboard))
        })
    }

    async fn charts(&self, ctx: &Context<'_>) -> async_graphql::Result<ChartsPayload> {
        with_dashboard(ctx, |dashboard| {
            let _guard = info_span!("hr.charts", records = dashboard.store().len()).entered();
            Ok(dashboard.charts().into())
        })
    }

    async fn employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<EmployeeNode>> {
        let id = EmployeeId::new(id.to_string());
        with_dashboard(ctx, |dashboard| {
            Ok(dashboard.store().get(&id).map(EmployeeNode::from))
        })
    }

    /// Department names in first-seen order, for filter pickers.
    async fn departments(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<String>> {
        with_dashboard(ctx, |dashboard| Ok(dashboard.departments()))
    }

    #[graphql(name = "exportCsv")]
    async fn export_csv(&self, ctx: &Context<'_>) -> async_graphql::Result<CsvExport> {
        with_dashboard(ctx, |dashboard| {
            let rows = dashboard.page().rows.len() as i32;
            Ok(CsvExport {
                filename: products_hr::CSV_FILENAME.to_string(),
                content: dashboard.export_csv(),
                rows,
            })
        })
    }
}

#[Object]
impl HrMutation {
    #[graphql(name = "createEmployee")]
    async fn create_employee(
        &self,
        ctx: &Context<'_>,
        input: EmployeeInput,
    ) -> async_graphql::Result<EmployeeNode> {
        with_dashboard(ctx, |dashboard| {
            let _guard = info_span!("hr.create_employee").entered();
            let created = dashboard.create(input.into_profile(None));
            Ok(EmployeeNode::from(&created))
        })
    }

    #[graphql(name = "updateEmployee")]
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: EmployeeInput,
    ) -> async_graphql::Result<EmployeeNode> {
        let id = EmployeeId::new(id.to_string());
        with_dashboard(ctx, |dashboard| {
            let _guard = info_span!("hr.update_employee", employee_id = %id).entered();
            let existing = dashboard
                .store()
                .get(&id)
                .map(|employee| employee.profile.clone())
                .ok_or_else(|| hr_error(HrError::EmployeeNotFound(id.clone())))?;
            dashboard
                .update(&id, input.into_profile(Some(&existing)))
                .map_err(hr_error)?;
            dashboard
                .store()
                .get(&id)
                .map(EmployeeNode::from)
                .ok_or_else(|| hr_error(HrError::EmployeeNotFound(id.clone())))
        })
    }

    /// `null` or an empty string clears the filter.
    #[graphql(name = "setDepartmentFilter")]
    async fn set_department_filter(
        &self,
        ctx: &Context<'_>,
        department: Option<String>,
    ) -> async_graphql::Result<DashboardPayload> {
        apply(ctx, Intent::DepartmentChanged(department))
    }

    #[graphql(name = "setExperienceBand")]
    async fn set_experience_band(
        &self,
        ctx: &Context<'_>,
        band: ExperienceBandGql,
    ) -> async_graphql::Result<DashboardPayload> {
        apply(ctx, Intent::ExperienceChanged(band.into()))
    }

    #[graphql(name = "setSortKey")]
    async fn set_sort_key(
        &self,
        ctx: &Context<'_>,
        key: SortKeyGql,
    ) -> async_graphql::Result<DashboardPayload> {
        apply(ctx, Intent::SortChanged(key.into()))
    }

    #[graphql(name = "setSearch")]
    async fn set_search(
        &self,
        ctx: &Context<'_>,
        text: String,
    ) -> async_graphql::Result<DashboardPayload> {
        apply(ctx, Intent::SearchChanged(text))
    }

    #[graphql(name = "setPage")]
    async fn set_page(&self, ctx: &Context<'_>, page: i32) -> async_graphql::Result<DashboardPayload> {
        if page < 1 {
            return Err(into_graphql(ApiError::invalid("page must be at least 1")));
        }
        apply(ctx, Intent::PageChanged(page as u32))
    }

    #[graphql(name = "openCreateForm")]
    async fn open_create_form(&self, ctx: &Context<'_>) -> async_graphql::Result<DashboardPayload> {
        apply(ctx, Intent::CreateRequested)
    }

    #[graphql(name = "openEditForm")]
    async fn open_edit_form(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<DashboardPayload> {
        apply(ctx, Intent::EditRequested(EmployeeId::new(id.to_string())))
    }

    #[graphql(name = "cancelForm")]
    async fn cancel_form(&self, ctx: &Context<'_>) -> async_graphql::Result<DashboardPayload> {
        apply(ctx, Intent::FormCancelled)
    }

    /// Create or update depending on which form is open; a no-op when none is.
    #[graphql(name = "submitForm")]
    async fn submit_form(
        &self,
        ctx: &Context<'_>,
        draft: DraftInput,
    ) -> async_graphql::Result<DashboardPayload> {
        apply(ctx, Intent::FormSubmitted(draft.into()))
    }
}

fn registry(ctx: &Context<'_>) -> async_graphql::Result<Arc<SessionRegistry>> {
    ctx.data::<Arc<SessionRegistry>>()
        .cloned()
        .map_err(|_| into_graphql(ApiError::internal(anyhow::anyhow!("missing session registry"))))
}

fn session(ctx: &Context<'_>) -> async_graphql::Result<SessionId> {
    ctx.data::<SessionId>()
        .copied()
        .map_err(|_| into_graphql(ApiError::internal(anyhow::anyhow!("missing session id"))))
}

fn with_dashboard<T>(
    ctx: &Context<'_>,
    f: impl FnOnce(&mut Dashboard) -> async_graphql::Result<T>,
) -> async_graphql::Result<T> {
    let registry = registry(ctx)?;
    let session = session(ctx)?;
    registry.with(session, f).map_err(into_graphql)?
}

fn apply(ctx: &Context<'_>, intent: Intent) -> async_graphql::Result<DashboardPayload> {
    with_dashboard(ctx, |dashboard| {
        dashboard.apply(intent).map_err(hr_error)?;
        Ok(DashboardPayload::from_dashboard(dashboard))
    })
}

fn hr_error(err: HrError) -> async_graphql::Error {
    let api = match &err {
        HrError::EmployeeNotFound(id) => ApiError::not_found(format!("employee {id}")),
        HrError::UnknownExperienceBand(_) | HrError::UnknownSortKey(_) => {
            ApiError::invalid(err.to_string())
        }
        HrError::DuplicateEmployee(_) | HrError::InvalidSeed(_) => {
            ApiError::internal(err.clone().into())
        }
    };
    into_graphql(api)
}
