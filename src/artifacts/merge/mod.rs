pub mod bca_finder;
pub mod conflict;
pub mod three_way;
