//! Chart-ready reductions over the full (unfiltered) record list.

use serde::Serialize;

use crate::model::Employee;

/// Chart palette, cycled by entry index.
pub const PALETTE: [&str; 5] = ["#8884d8", "#82ca9d", "#ffc658", "#ff8042", "#8dd1e1"];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepartmentShare {
    pub name: String,
    pub count: usize,
    pub color: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SalaryBucket {
    #[serde(rename = "<3L")]
    UpTo3L,
    #[serde(rename = "3-6L")]
    UpTo6L,
    #[serde(rename = "6-10L")]
    UpTo10L,
    #[serde(rename = "10L+")]
    Above10L,
}

impl SalaryBucket {
    pub const ALL: [SalaryBucket; 4] = [
        SalaryBucket::UpTo3L,
        SalaryBucket::UpTo6L,
        SalaryBucket::UpTo10L,
        SalaryBucket::Above10L,
    ];

    /// Inclusive upper bounds: 300,000 is `<3L`, 300,001 is `3-6L`.
    pub fn for_salary(salary: u64) -> Self {
        match salary {
            0..=300_000 => SalaryBucket::UpTo3L,
            300_001..=600_000 => SalaryBucket::UpTo6L,
            600_001..=1_000_000 => SalaryBucket::UpTo10L,
            _ => SalaryBucket::Above10L,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SalaryBucket::UpTo3L => "<3L",
            SalaryBucket::UpTo6L => "3-6L",
            SalaryBucket::UpTo10L => "6-10L",
            SalaryBucket::Above10L => "10L+",
        }
    }

    /// Inclusive `(min, max)`; `None` max means unbounded.
    pub fn range(self) -> (u64, Option<u64>) {
        match self {
            SalaryBucket::UpTo3L => (0, Some(300_000)),
            SalaryBucket::UpTo6L => (300_001, Some(600_000)),
            SalaryBucket::UpTo10L => (600_001, Some(1_000_000)),
            SalaryBucket::Above10L => (1_000_001, None),
        }
    }

    fn index(self) -> usize {
        match self {
            SalaryBucket::UpTo3L => 0,
            SalaryBucket::UpTo6L => 1,
            SalaryBucket::UpTo10L => 2,
            SalaryBucket::Above10L => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub bucket: SalaryBucket,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepartmentAverage {
    pub name: String,
    pub average: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_employees: usize,
    pub active_employees: usize,
    pub average_salary: u64,
    pub departments: usize,
}

/// Everything the charts view renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub department_distribution: Vec<DepartmentShare>,
    pub salary_histogram: Vec<BucketCount>,
    pub average_salary_by_department: Vec<DepartmentAverage>,
}

impl ChartData {
    pub fn compute(records: &[Employee]) -> Self {
        Self {
            department_distribution: department_distribution(records),
            salary_histogram: salary_histogram(records),
            average_salary_by_department: average_salary_by_department(records),
        }
    }
}

/// Rounded mean, half away from zero.
fn rounded_mean(total: u128, count: u128) -> u64 {
    if count == 0 {
        return 0;
    }
    ((total * 2 + count) / (count * 2)) as u64
}

struct DepartmentTotals<'a> {
    name: &'a str,
    count: usize,
    salary_total: u128,
}

fn fold_departments(records: &[Employee]) -> Vec<DepartmentTotals<'_>> {
    let mut totals: Vec<DepartmentTotals<'_>> = Vec::new();
    for employee in records {
        let name = employee.department_name();
        let salary = u128::from(employee.profile.salary);
        match totals.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.count += 1;
                entry.salary_total += salary;
            }
            None => totals.push(DepartmentTotals {
                name,
                count: 1,
                salary_total: salary,
            }),
        }
    }
    totals
}

pub fn department_distribution(records: &[Employee]) -> Vec<DepartmentShare> {
    fold_departments(records)
        .into_iter()
        .enumerate()
        .map(|(index, entry)| DepartmentShare {
            name: entry.name.to_string(),
            count: entry.count,
            color: palette_color(index),
        })
        .collect()
}

pub fn salary_histogram(records: &[Employee]) -> Vec<BucketCount> {
    let mut counts = [0usize; 4];
    for employee in records {
        counts[SalaryBucket::for_salary(employee.profile.salary).index()] += 1;
    }
    SalaryBucket::ALL
        .into_iter()
        .map(|bucket| BucketCount {
            bucket,
            count: counts[bucket.index()],
        })
        .collect()
}

pub fn average_salary_by_department(records: &[Employee]) -> Vec<DepartmentAverage> {
    fold_departments(records)
        .into_iter()
        .map(|entry| DepartmentAverage {
            name: entry.name.to_string(),
            average: rounded_mean(entry.salary_total, entry.count as u128),
        })
        .collect()
}

pub fn summary(records: &[Employee]) -> Summary {
    let total: u128 = records
        .iter()
        .map(|employee| u128::from(employee.profile.salary))
        .sum();
    Summary {
        total_employees: records.len(),
        active_employees: records.iter().filter(|e| e.profile.is_active).count(),
        average_salary: rounded_mean(total, records.len() as u128),
        departments: fold_departments(records).len(),
    }
}
