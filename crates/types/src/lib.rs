pub mod meta;
pub mod post;
pub mod query;
pub mod utils;
