//! pinecheck - static checks for Pine Script indicator suites
//!
//! Two independent analyses over a directory of scripts:
//!
//! - [`validator`] scores each script on its own (syntax, repainting,
//!   performance, style, structure, complexity).
//! - [`integration`] checks how the scripts of a suite feed each other
//!   through data-window outputs and `input.source` inputs.

pub mod cli;
pub mod config;
pub mod integration;
pub mod models;
pub mod reporters;
mod scan;
pub mod scoring;
pub mod scripts;
pub mod validator;
