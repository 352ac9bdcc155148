pub mod client;
pub mod request_controller;
pub mod viewer;
