//! Selection over in-memory collections, plus the URL codec for queries.

pub mod codec;
mod exec;
mod types;

pub(crate) use exec::{count_with, find_first_with, find_many_with, find_unique_with};

pub use codec::{decode, decode_json, encode, encode_json, try_decode, try_decode_json};
pub use exec::{count, find_first, find_many, find_unique};
pub use types::{DEFAULT_PAGE_SIZE, Distinct, FindManyResult, FindQuery, PageInfo, PageRequest};
