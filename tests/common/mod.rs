#![allow(dead_code)]

use std::error::Error;

#[allow(unused_imports)]
pub use confbox_test_utils::init_tracing;

pub type TestResult = Result<(), Box<dyn Error>>;
