pub mod auth;
pub mod charts;
pub mod dashboard;
pub mod forms;
pub mod images;
pub mod nav;
pub mod posts;
