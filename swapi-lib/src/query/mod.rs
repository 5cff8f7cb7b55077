//! Query-parameter encoder.
//!
//! Translates a structured description of filtering, ordering, projection,
//! pagination and settings into the API's bracketed parameter dialect:
//!
//! ```text
//! filter[name][contains]=STB
//! filter[attributes][476][hasText]=keyword
//! filterOr[0][status][eq]=active
//! order[createdAt]=desc
//! page[limit]=50
//! setting[with_relations]=true
//! ```
//!
//! Encoding is pure: nothing here performs I/O.
//!
//! # Types
//!
//! - [`Query`] - Builder for the whole description, encoded with [`Query::to_params`]
//! - [`Condition`] - A single filter condition
//! - [`OrderBy`] - Ordering specification for list results
//! - [`QueryParams`] - The flat, ordered parameter list sent on the wire

mod filter;
mod order;
mod params;

pub use filter::Condition;
pub use filter::FieldPath;
pub use filter::FilterKey;
pub use filter::FilterValue;
pub use filter::Operator;
pub use order::Direction;
pub use order::OrderBy;
pub use params::Query;
pub use params::QueryParams;
pub use params::Settings;
