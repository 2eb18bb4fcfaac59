use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    aggregate::{self, ChartData, Summary},
    error::{HrError, HrResult},
    export,
    model::{Employee, EmployeeDraft, EmployeeId, EmployeeProfile},
    store::RecordStore,
    view::{self, ExperienceBand, FormMode, SortKey, ViewPage, ViewState},
};

/// A user action raised by a presentation surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Intent {
    DepartmentChanged(Option<String>),
    ExperienceChanged(ExperienceBand),
    SortChanged(SortKey),
    SearchChanged(String),
    PageChanged(u32),
    CreateRequested,
    EditRequested(EmployeeId),
    FormSubmitted(EmployeeDraft),
    FormCancelled,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    ViewChanged,
    Created(Employee),
    Updated(EmployeeId),
    /// Submit arrived while no form was open.
    Ignored,
}

/// One session's store snapshot plus its view state.
#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    store: RecordStore,
    view: ViewState,
}

impl Dashboard {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            view: ViewState::default(),
        }
    }

    pub fn with_view(store: RecordStore, view: ViewState) -> Self {
        Self { store, view }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn page(&self) -> ViewPage<'_> {
        view::derive_view(self.store.records(), &self.view)
    }

    pub fn departments(&self) -> Vec<String> {
        view::department_names(self.store.records())
    }

    pub fn summary(&self) -> Summary {
        aggregate::summary(self.store.records())
    }

    pub fn charts(&self) -> ChartData {
        ChartData::compute(self.store.records())
    }

    /// CSV of the rows on the current page only.
    pub fn export_csv(&self) -> String {
        export::export_csv(&self.page().rows)
    }

    /// Values to prefill the form overlay with, when it is open.
    pub fn form_draft(&self) -> Option<EmployeeDraft> {
        match &self.view.form {
            FormMode::Closed => None,
            FormMode::Creating => Some(EmployeeDraft::default()),
            FormMode::Editing { id } => self
                .store
                .get(id)
                .map(|employee| EmployeeDraft::from_profile(&employee.profile)),
        }
    }

    pub fn create(&mut self, profile: EmployeeProfile) -> Employee {
        let (next, employee) = self.store.create(profile);
        self.store = next;
        info!(employee_id = %employee.id, total = self.store.len(), "employee added");
        employee
    }

    pub fn update(&mut self, id: &EmployeeId, profile: EmployeeProfile) -> HrResult<()> {
        self.store = self.store.update(id, profile)?;
        info!(employee_id = %id, "employee saved");
        Ok(())
    }

    pub fn apply(&mut self, intent: Intent) -> HrResult<Outcome> {
        debug!(?intent, "applying dashboard intent");
        match intent {
            Intent::DepartmentChanged(department) => {
                self.view.department = department.filter(|name| !name.is_empty());
                self.view.page = 1;
            }
            Intent::ExperienceChanged(band) => {
                self.view.experience = band;
                self.view.page = 1;
            }
            Intent::SortChanged(key) => {
                self.view.sort = key;
                self.view.page = 1;
            }
            Intent::SearchChanged(text) => {
                self.view.search = text;
                self.view.page = 1;
            }
            Intent::PageChanged(page) => {
                let total_pages = self.page().total_pages;
                self.view.page = view::clamp_page(page, total_pages);
            }
            Intent::CreateRequested => {
                self.view.form = FormMode::Creating;
            }
            Intent::EditRequested(id) => {
                if self.store.get(&id).is_none() {
                    return Err(HrError::EmployeeNotFound(id));
                }
                self.view.form = FormMode::Editing { id };
            }
            Intent::FormCancelled => {
                self.view.form = FormMode::Closed;
            }
            Intent::FormSubmitted(draft) => return self.submit(draft),
        }
        Ok(Outcome::ViewChanged)
    }

    fn submit(&mut self, draft: EmployeeDraft) -> HrResult<Outcome> {
        let outcome = match self.view.form.clone() {
            FormMode::Closed => return Ok(Outcome::Ignored),
            FormMode::Creating => Outcome::Created(self.create(draft.into_profile())),
            FormMode::Editing { id } => {
                let base = self
                    .store
                    .get(&id)
                    .map(|employee| employee.profile.clone())
                    .ok_or_else(|| HrError::EmployeeNotFound(id.clone()))?;
                self.update(&id, draft.apply_to(base))?;
                Outcome::Updated(id)
            }
        };
        self.view.form = FormMode::Closed;
        Ok(outcome)
    }
}
