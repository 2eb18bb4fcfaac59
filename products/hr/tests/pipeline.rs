use products_hr::{
    Dashboard, Department, Employee, EmployeeDraft, EmployeeId, EmployeeProfile, Intent,
    Outcome, RecordStore, Role, SalaryBucket, SortKey, ViewState, aggregate, derive_view,
    seed::mock_store,
};

fn employee(index: usize, department: &str, salary: u64) -> Employee {
    Employee::new(
        EmployeeId::new(format!("id-{index}")),
        EmployeeProfile {
            first_name: format!("First{index:02}"),
            last_name: "Person".into(),
            email: format!("p{index}@corp.test"),
            role: Role {
                title: "Associate".into(),
                level: "L1".into(),
                ..Role::default()
            },
            department: Department {
                name: department.into(),
                ..Department::default()
            },
            experience_years: (index % 9) as u32,
            salary,
            ..EmployeeProfile::default()
        },
    )
}

/// Twelve records, seven of them in department A.
fn twelve_records() -> Vec<Employee> {
    (0..12)
        .map(|i| employee(i, if i < 7 { "A" } else { "B" }, 250_000 + i as u64 * 50_000))
        .collect()
}

#[test]
fn filtering_one_department_fits_on_one_page() {
    let records = twelve_records();
    let state = ViewState {
        department: Some("A".into()),
        ..ViewState::default()
    };
    let page = derive_view(&records, &state);
    assert_eq!(page.filtered, 7);
    assert_eq!(page.rows.len(), 7);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 1);
    assert!(page.rows.iter().all(|e| e.department_name() == "A"));
}

#[test]
fn unfiltered_twelve_records_span_two_pages() {
    let records = twelve_records();
    let first = derive_view(&records, &ViewState::default());
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.rows.len(), 10);
    assert!(first.has_next());

    let second = derive_view(
        &records,
        &ViewState {
            page: 2,
            ..ViewState::default()
        },
    );
    assert_eq!(second.rows.len(), 2);
    assert!(second.has_previous());
    assert!(!second.has_next());
}

#[test]
fn salary_boundary_values_land_in_the_lower_bucket() {
    let records = vec![employee(0, "A", 300_000), employee(1, "A", 300_001)];
    let histogram = aggregate::salary_histogram(&records);
    let count_for = |bucket: SalaryBucket| {
        histogram
            .iter()
            .find(|entry| entry.bucket == bucket)
            .map(|entry| entry.count)
            .unwrap_or_default()
    };
    assert_eq!(count_for(SalaryBucket::UpTo3L), 1);
    assert_eq!(count_for(SalaryBucket::UpTo6L), 1);
    assert_eq!(count_for(SalaryBucket::UpTo10L), 0);
}

#[test]
fn session_walkthrough_over_the_mock_roster() {
    let mut dash = Dashboard::new(mock_store());
    let seeded = dash.store().len();

    dash.apply(Intent::SortChanged(SortKey::Salary)).unwrap();
    let top = dash.page().rows[0].id.clone();
    assert_eq!(top, EmployeeId::from("emp-014"));

    dash.apply(Intent::CreateRequested).unwrap();
    let outcome = dash
        .apply(Intent::FormSubmitted(EmployeeDraft {
            first_name: "Tara".into(),
            last_name: "Ghosh".into(),
            email: "tara@company.test".into(),
            role_title: "Principal Engineer".into(),
            department: "Engineering".into(),
            experience_years: 15,
            salary: 4_000_000,
        }))
        .unwrap();
    let Outcome::Created(tara) = outcome else {
        panic!("expected creation");
    };
    assert_eq!(dash.store().len(), seeded + 1);
    assert_eq!(dash.page().rows[0].id, tara.id);

    dash.apply(Intent::SearchChanged("principal".into())).unwrap();
    let page = dash.page();
    assert_eq!(page.filtered, 1);
    assert_eq!(dash.export_csv().lines().count(), 2);

    let summary = dash.summary();
    assert_eq!(summary.total_employees, seeded + 1);
}

#[test]
fn snapshots_are_not_shared_between_dashboards() {
    let seed = mock_store();
    let mut left = Dashboard::new(seed.clone());
    let right = Dashboard::new(seed.clone());
    left.create(EmployeeProfile::default());
    assert_eq!(left.store().len(), seed.len() + 1);
    assert_eq!(right.store().len(), seed.len());
    assert!(right.store().same_snapshot(&seed));
}

#[test]
fn missing_update_leaves_store_untouched() {
    let store = RecordStore::from_records(twelve_records()).unwrap();
    let mut dash = Dashboard::new(store.clone());
    let err = dash
        .update(&EmployeeId::from("ghost"), EmployeeProfile::default())
        .unwrap_err();
    assert!(err.to_string().contains("ghost"));
    assert!(dash.store().same_snapshot(&store));
}
