//! Host-facing hooks that sit outside the layout core.

pub mod pagination;

pub use pagination::{PaginationEvent, PaginationListener};
