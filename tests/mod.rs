mod common;
mod validation_tests;
