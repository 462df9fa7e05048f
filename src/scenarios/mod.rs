//! The packaged seed-and-report scenarios.
//!
//! Each scenario declares a schema, literal seed rows and a handful of
//! canned reports. [`crate::runner::run`] drives one through
//! initialize → seed → report.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::report::Report;
use crate::schema::Schema;
use crate::seed::TableSeed;

mod academic_records;
mod accounts_report;
mod clients_churn;
mod clients_status;
mod company_contacts;
mod company_records;
mod devops_productivity;
mod employees_projects;
mod game_stats;
mod hopeless_students;
mod inventory_status;
mod literary_archive;
mod product_catalog;
mod service_cross_check;
mod staff_division;
mod store_transactions;
mod teachers_without_classes;

pub use academic_records::AcademicRecords;
pub use accounts_report::AccountsReport;
pub use clients_churn::ClientsChurn;
pub use clients_status::ClientsStatus;
pub use company_contacts::CompanyContacts;
pub use company_records::CompanyRecords;
pub use devops_productivity::DevopsProductivity;
pub use employees_projects::EmployeesProjects;
pub use game_stats::GameStats;
pub use hopeless_students::HopelessStudents;
pub use inventory_status::InventoryStatus;
pub use literary_archive::LiteraryArchive;
pub use product_catalog::ProductCatalog;
pub use service_cross_check::ServiceCrossCheck;
pub use staff_division::StaffDivision;
pub use store_transactions::StoreTransactions;
pub use teachers_without_classes::TeachersWithoutClasses;

/// Inputs shared by every scenario in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    /// "Today" for scenarios whose seed data is relative to the run date.
    pub as_of: NaiveDate,
}

pub trait Scenario {
    /// Stable name used on the command line.
    fn name(&self) -> &'static str;

    fn summary(&self) -> &'static str;

    /// File name of the throwaway database, relative to the output directory.
    fn db_file(&self) -> &'static str;

    fn foreign_keys(&self) -> bool {
        false
    }

    /// Placeholder for NULL cells, overriding the configured one.
    fn null_placeholder(&self) -> Option<&'static str> {
        None
    }

    fn schema(&self) -> Schema;

    fn seeds(&self, ctx: &RunContext) -> Vec<TableSeed>;

    fn reports(&self, ctx: &RunContext) -> Vec<Report>;
}

/// Every scenario, in listing order.
pub fn all() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(AcademicRecords),
        Box::new(AccountsReport),
        Box::new(ClientsStatus),
        Box::new(ClientsChurn),
        Box::new(CompanyContacts),
        Box::new(CompanyRecords),
        Box::new(DevopsProductivity),
        Box::new(EmployeesProjects),
        Box::new(GameStats),
        Box::new(HopelessStudents),
        Box::new(InventoryStatus),
        Box::new(LiteraryArchive),
        Box::new(ProductCatalog),
        Box::new(ServiceCrossCheck),
        Box::new(StaffDivision),
        Box::new(TeachersWithoutClasses),
        Box::new(StoreTransactions),
    ]
}

pub fn find(name: &str) -> Result<Box<dyn Scenario>> {
    all()
        .into_iter()
        .find(|s| s.name() == name)
        .ok_or_else(|| Error::UnknownScenario(name.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_and_files_are_unique() {
        let scenarios = all();
        let names: HashSet<_> = scenarios.iter().map(|s| s.name()).collect();
        let files: HashSet<_> = scenarios.iter().map(|s| s.db_file()).collect();
        assert_eq!(names.len(), scenarios.len());
        assert_eq!(files.len(), scenarios.len());
    }

    #[test]
    fn every_schema_is_valid_and_every_scenario_reports() {
        let ctx = RunContext {
            as_of: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        };
        for scenario in all() {
            scenario.schema().validate().unwrap();
            assert!(!scenario.seeds(&ctx).is_empty(), "{}", scenario.name());
            assert!(!scenario.reports(&ctx).is_empty(), "{}", scenario.name());
        }
    }

    #[test]
    fn find_rejects_unknown_names() {
        assert_eq!(find("game-stats").unwrap().name(), "game-stats");
        assert!(matches!(find("payroll"), Err(Error::UnknownScenario(_))));
    }
}
