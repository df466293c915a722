pub mod crawler;
pub mod listing;
pub mod memory;
pub mod web;

pub use crawler::PageSource;
pub use listing::ListingCrawler;
pub use memory::MemorySource;
pub use web::HttpSource;
