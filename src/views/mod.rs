pub mod analytics;
pub mod guest_list;

pub use analytics::{Dashboard, StatusCounts, TrendMode, TrendSeries};
pub use guest_list::{GuestListView, Page, StatusFilter};
