//! Output generation for scraped results.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2017-07-22/
//!     ├── morning.json
//!     ├── afternoon.json
//!     └── evening.json
//! ```
//!
//! Each file is an [`AuthorIndex`](crate::models::AuthorIndex): author name
//! to the list of records scraped for that author.

pub mod json;
