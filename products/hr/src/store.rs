use std::{collections::HashSet, sync::Arc};

use tracing::debug;

use crate::{
    error::{HrError, HrResult},
    model::{Employee, EmployeeId, EmployeeProfile},
};

/// Immutable snapshot of the session's employee records.
///
/// Mutations never touch an existing snapshot: `create` and `update` build a new
/// backing list and hand back a fresh store, so cloning a store is a pointer copy
/// and any view computed from an older snapshot stays valid.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Arc<Vec<Employee>>,
}

impl RecordStore {
    /// Build a store from seed records, rejecting duplicate identifiers.
    pub fn from_records(records: Vec<Employee>) -> HrResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.clone()) {
                return Err(HrError::DuplicateEmployee(record.id.clone()));
            }
        }
        Ok(Self {
            records: Arc::new(records),
        })
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &EmployeeId) -> Option<&Employee> {
        self.records.iter().find(|employee| &employee.id == id)
    }

    /// True when both stores share the same backing snapshot.
    pub fn same_snapshot(&self, other: &RecordStore) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// Append a record under a freshly generated identifier.
    pub fn create(&self, profile: EmployeeProfile) -> (RecordStore, Employee) {
        let mut id = EmployeeId::generate();
        while self.get(&id).is_some() {
            id = EmployeeId::generate();
        }
        let employee = Employee::new(id, profile);
        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.extend(self.records.iter().cloned());
        next.push(employee.clone());
        debug!(employee_id = %employee.id, total = next.len(), "employee created");
        (
            RecordStore {
                records: Arc::new(next),
            },
            employee,
        )
    }

    /// Replace every attribute except the identifier.
    ///
    /// An unknown identifier leaves the store untouched and is reported as
    /// `EmployeeNotFound`.
    pub fn update(&self, id: &EmployeeId, profile: EmployeeProfile) -> HrResult<RecordStore> {
        let position = self
            .records
            .iter()
            .position(|employee| &employee.id == id)
            .ok_or_else(|| HrError::EmployeeNotFound(id.clone()))?;
        let mut next = self.records.as_ref().clone();
        next[position].profile = profile;
        debug!(employee_id = %id, "employee updated");
        Ok(RecordStore {
            records: Arc::new(next),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(first: &str, salary: u64) -> EmployeeProfile {
        EmployeeProfile {
            first_name: first.into(),
            last_name: "Tester".into(),
            salary,
            ..EmployeeProfile::default()
        }
    }

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            Employee::new("a".into(), profile("Anil", 100)),
            Employee::new("b".into(), profile("Bina", 200)),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_seed_ids_are_rejected() {
        let err = RecordStore::from_records(vec![
            Employee::new("a".into(), profile("Anil", 1)),
            Employee::new("a".into(), profile("Arun", 2)),
        ])
        .unwrap_err();
        assert_eq!(err, HrError::DuplicateEmployee("a".into()));
    }

    #[test]
    fn create_appends_and_leaves_old_snapshot_alone() {
        let before = store();
        let (after, created) = before.create(profile("Chitra", 300));
        assert_eq!(before.len(), 2);
        assert_eq!(after.len(), 3);
        assert!(!after.same_snapshot(&before));
        assert_eq!(after.records().last(), Some(&created));
        assert_eq!(after.get(&created.id).map(|e| e.profile.salary), Some(300));
        assert!(before.get(&created.id).is_none());
    }

    #[test]
    fn created_ids_are_unique() {
        let base = store();
        let (one, first) = base.create(profile("X", 1));
        let (_, second) = one.create(profile("Y", 2));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn update_replaces_profile_and_keeps_id() {
        let before = store();
        let id = EmployeeId::from("b");
        let after = before.update(&id, profile("Bhavna", 250)).unwrap();
        assert_eq!(after.len(), 2);
        let updated = after.get(&id).unwrap();
        assert_eq!(updated.profile.first_name, "Bhavna");
        assert_eq!(updated.profile.salary, 250);
        assert_eq!(before.get(&id).unwrap().profile.first_name, "Bina");
        assert_eq!(after.records()[1].id, id);
    }

    #[test]
    fn update_of_missing_id_is_reported() {
        let before = store();
        let err = before
            .update(&EmployeeId::from("zzz"), profile("Nobody", 0))
            .unwrap_err();
        assert_eq!(err, HrError::EmployeeNotFound("zzz".into()));
    }
}
