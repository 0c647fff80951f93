pub mod connectivity;
pub mod feed;
pub mod loader;
pub mod presentation;
