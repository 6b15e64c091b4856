pub mod app;
pub mod cli;
pub mod display;
pub mod error;
pub mod export;
pub mod model;
pub mod query;
pub mod sort;
pub mod stats;
pub mod storage;
pub mod store;
pub mod util;

pub use app::run;
pub use query::{Criteria, filter_and_sort};
pub use stats::{category_stats, overall_stats, priority_stats};
