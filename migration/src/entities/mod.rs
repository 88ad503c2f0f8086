pub mod event;
pub mod lead;
pub mod page_visit;
pub mod user;
