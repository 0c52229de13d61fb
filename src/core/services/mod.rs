pub mod aggregation_service;
pub mod chart_service;
pub mod report_service;

pub use aggregation_service::{AggregationService, CategoryTotal, PaymentExtremes, UserTotals};
pub use chart_service::{ChartPage, ChartService};
pub use report_service::ReportService;
