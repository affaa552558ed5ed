pub mod prompt;
pub mod report;

pub use prompt::prompt_form;
pub use report::ReportView;
