//! Client domain entities.

pub mod listing;
pub mod status;

pub use listing::ClientListRow;
pub use status::RecordStatus;
