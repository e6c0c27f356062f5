mod cursor;
mod metrics;
mod paging;
mod types;

pub use cursor::{decode_cursor, encode_cursor};
pub use metrics::{
    NOTE_TARGET_UNREACHABLE, NOTE_ZERO_INVESTMENTS, compute_fire_metrics,
    compute_fire_metrics_at, fractional_age, years_to_target,
};
pub use paging::page_after;
pub use types::{
    CursorData, FireInputs, FireMetrics, InvestmentPage, InvestmentRecord, SortOption, SortValue,
};
