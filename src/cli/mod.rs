//! Command line workflows, kept apart from argument parsing

pub mod orchestration;
