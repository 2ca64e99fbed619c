//! Evaluation suites that span several modules.
//!
//! Scripts are built directly as `lingua_ir` trees through the helpers in
//! `fixture` and run on an interpreter that prints into a buffer.

mod class_tests;
mod closure_tests;
