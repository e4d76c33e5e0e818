pub mod config;
pub mod fixtures_fetch;
pub mod normalize;
pub mod palette;
pub mod persist;
pub mod sample_feed;
pub mod summary;
pub mod table;
pub mod timeline;
pub mod ui;
