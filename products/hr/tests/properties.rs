//! Property tests for the derived-view pipeline and aggregates.

use proptest::prelude::*;

use products_hr::{
    Department, Employee, EmployeeId, EmployeeProfile, ExperienceBand, PAGE_SIZE, RecordStore,
    Role, SalaryBucket, SortKey, ViewState, aggregate, derive_view, export_csv,
};

const NAMES: [&str; 6] = ["Asha", "Bala", "Chetan", "Asha", "Deepa", "Bala"];
const TITLES: [&str; 4] = ["Engineer", "Designer", "Analyst", "Manager"];
const DEPARTMENTS: [&str; 3] = ["Engineering", "Design", "Finance"];

fn arb_employee() -> impl Strategy<Value = EmployeeProfile> {
    (
        0usize..NAMES.len(),
        0usize..TITLES.len(),
        0usize..DEPARTMENTS.len(),
        0u32..15,
        0u64..2_000_000,
        any::<bool>(),
    )
        .prop_map(|(name, title, dept, years, salary, active)| EmployeeProfile {
            first_name: NAMES[name].to_string(),
            last_name: "Lal".to_string(),
            role: Role {
                title: TITLES[title].to_string(),
                ..Role::default()
            },
            department: Department {
                name: DEPARTMENTS[dept].to_string(),
                ..Department::default()
            },
            experience_years: years,
            salary,
            is_active: active,
            ..EmployeeProfile::default()
        })
}

fn arb_records() -> impl Strategy<Value = Vec<Employee>> {
    prop::collection::vec(arb_employee(), 0..40).prop_map(|profiles| {
        profiles
            .into_iter()
            .enumerate()
            .map(|(i, profile)| Employee::new(EmployeeId::new(format!("e{i}")), profile))
            .collect()
    })
}

fn arb_band() -> impl Strategy<Value = ExperienceBand> {
    prop_oneof![
        Just(ExperienceBand::Any),
        Just(ExperienceBand::Junior),
        Just(ExperienceBand::Mid),
        Just(ExperienceBand::Senior),
    ]
}

fn arb_sort() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Name),
        Just(SortKey::Experience),
        Just(SortKey::Salary),
    ]
}

fn arb_state() -> impl Strategy<Value = ViewState> {
    (
        prop::option::of(0usize..DEPARTMENTS.len()),
        arb_band(),
        arb_sort(),
        prop_oneof![Just(""), Just("as"), Just("ENG"), Just("lal"), Just("zz")],
        0u32..8,
    )
        .prop_map(|(dept, experience, sort, search, page)| ViewState {
            department: dept.map(|d| DEPARTMENTS[d].to_string()),
            experience,
            sort,
            search: search.to_string(),
            page,
            ..ViewState::default()
        })
}

fn position(records: &[Employee], id: &EmployeeId) -> usize {
    records.iter().position(|e| &e.id == id).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn visible_rows_satisfy_every_predicate(records in arb_records(), state in arb_state()) {
        let page = derive_view(&records, &state);
        let needle = state.search.trim().to_lowercase();
        for row in &page.rows {
            let profile = &row.profile;
            if let Some(dept) = &state.department {
                prop_assert_eq!(&profile.department.name, dept);
            }
            prop_assert!(state.experience.contains(profile.experience_years));
            if !needle.is_empty() {
                prop_assert!(
                    profile.full_name().to_lowercase().contains(&needle)
                        || profile.role.title.to_lowercase().contains(&needle)
                );
            }
            prop_assert!(records.iter().any(|r| r.id == row.id));
        }
    }

    #[test]
    fn pagination_bounds_hold(records in arb_records(), state in arb_state()) {
        let page = derive_view(&records, &state);
        prop_assert!(page.rows.len() <= PAGE_SIZE);
        prop_assert!(page.page >= 1);
        prop_assert!(page.page <= page.total_pages.max(1));
        if page.page < page.total_pages {
            prop_assert_eq!(page.rows.len(), PAGE_SIZE);
        }
        let before = (page.page as usize - 1) * PAGE_SIZE;
        prop_assert_eq!(page.rows.len(), page.filtered.saturating_sub(before).min(PAGE_SIZE));
    }

    #[test]
    fn sorting_is_stable(records in arb_records(), sort in arb_sort()) {
        let state = ViewState { sort, ..ViewState::default() };
        let mut all = Vec::new();
        let pages = derive_view(&records, &state).total_pages.max(1);
        for page in 1..=pages {
            let view = derive_view(&records, &ViewState { page, ..state.clone() });
            all.extend(view.rows);
        }
        prop_assert_eq!(all.len(), records.len());
        for pair in all.windows(2) {
            let (a, b) = (&pair[0].profile, &pair[1].profile);
            let tied = match sort {
                SortKey::Name => a.first_name == b.first_name,
                SortKey::Experience => a.experience_years == b.experience_years,
                SortKey::Salary => a.salary == b.salary,
            };
            if tied {
                prop_assert!(position(&records, &pair[0].id) < position(&records, &pair[1].id));
            }
        }
    }

    #[test]
    fn every_salary_lands_in_exactly_one_bucket(salary in any::<u64>()) {
        let hits = SalaryBucket::ALL
            .iter()
            .filter(|bucket| {
                let (min, max) = bucket.range();
                salary >= min && max.is_none_or(|max| salary <= max)
            })
            .count();
        prop_assert_eq!(hits, 1);
        let (min, max) = SalaryBucket::for_salary(salary).range();
        prop_assert!(salary >= min && max.is_none_or(|max| salary <= max));
    }

    #[test]
    fn histogram_total_matches_record_count(records in arb_records()) {
        let total: usize = aggregate::salary_histogram(&records).iter().map(|b| b.count).sum();
        prop_assert_eq!(total, records.len());
        let shares: usize = aggregate::department_distribution(&records).iter().map(|d| d.count).sum();
        prop_assert_eq!(shares, records.len());
    }

    #[test]
    fn csv_has_one_line_per_visible_row(records in arb_records(), state in arb_state()) {
        let page = derive_view(&records, &state);
        let csv = export_csv(&page.rows);
        prop_assert_eq!(csv.split('\n').count(), page.rows.len() + 1);
    }

    #[test]
    fn create_then_update_preserves_identity(records in arb_records(), profile in arb_employee()) {
        let store = RecordStore::from_records(records).unwrap();
        let (grown, created) = store.create(profile.clone());
        prop_assert_eq!(grown.len(), store.len() + 1);
        prop_assert_eq!(&grown.get(&created.id).unwrap().profile, &profile);

        let mut changed = profile;
        changed.salary = changed.salary.saturating_add(1);
        let updated = grown.update(&created.id, changed.clone()).unwrap();
        prop_assert_eq!(updated.len(), grown.len());
        prop_assert_eq!(&updated.get(&created.id).unwrap().profile, &changed);
        prop_assert_eq!(&grown.get(&created.id).unwrap().profile.salary, &(changed.salary - 1));
    }
}
