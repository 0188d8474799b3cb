pub mod feed;
pub mod inmemory_repo;
