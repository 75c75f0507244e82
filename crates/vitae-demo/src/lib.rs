#![forbid(unsafe_code)]

//! Headless demo for the vitae backdrop.

pub mod cli;
pub mod sim;
