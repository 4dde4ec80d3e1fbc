pub mod crawler;
pub mod frontier;
pub mod traversal;
pub mod web;

#[cfg(test)]
mod tests;

pub use crawler::PageFetcher;
pub use frontier::Frontier;
pub use traversal::traverse;
pub use web::WebFetcher;
