pub mod config;
pub mod error;
pub mod exemption;
pub mod gpa;
pub mod output;
pub mod transcript;
