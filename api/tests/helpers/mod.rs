#![allow(dead_code)]

pub mod app;
pub mod request;

pub use app::{Packager, TestApp, make_test_app, make_test_app_with};
