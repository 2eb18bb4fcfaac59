//! HR vertical slice: the employee record store and everything derived from it.
//!
//! The crate is I/O free. A [`Dashboard`] owns one session's [`RecordStore`]
//! snapshot and [`ViewState`]; presentation surfaces feed it [`Intent`]s and
//! render [`ViewPage`]s, [`ChartData`] and [`Summary`] values computed on demand.

pub mod aggregate;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod model;
pub mod seed;
pub mod store;
pub mod view;

pub use aggregate::{
    BucketCount, ChartData, DepartmentAverage, DepartmentShare, PALETTE, SalaryBucket, Summary,
};
pub use dashboard::{Dashboard, Intent, Outcome};
pub use error::{HrError, HrResult};
pub use export::{CSV_FILENAME, CSV_HEADER, export_csv};
pub use model::{Department, Employee, EmployeeDraft, EmployeeId, EmployeeProfile, Role};
pub use store::RecordStore;
pub use view::{
    ExperienceBand, FormMode, PAGE_SIZE, SortKey, ViewPage, ViewState, department_names,
    derive_view,
};
