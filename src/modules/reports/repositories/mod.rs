mod report_repository;

pub use report_repository::{
    MySqlReportStore, OrderLineRecord, OrderRecord, OrderReportFilter, ReportStore, TargetRecord,
    TargetReportFilter,
};
