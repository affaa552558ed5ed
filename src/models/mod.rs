pub mod advice;
pub mod chart;
pub mod prediction;
pub mod region;
pub mod report;
pub mod request;

pub use advice::*;
pub use chart::*;
pub use prediction::*;
pub use region::*;
pub use report::*;
pub use request::*;
