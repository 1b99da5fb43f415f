//! Boundary schemas for the label entity of the Larder recipe manager, plus
//! the pagination envelope its list endpoints return.

pub mod config;
pub mod error;
pub mod label;
pub mod pagination;
pub mod schema;

pub use config::PaginationConfig;
pub use error::{Result, ValidationError};
pub use label::{
    LabelCreate, LabelOut, LabelPagination, LabelRecord, LabelSave, LabelSummary, LabelUpdate,
};
pub use pagination::{OrderDirection, PaginationBase, PaginationQuery};
pub use schema::Searchable;
