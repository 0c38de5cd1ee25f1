#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod datamodel;
pub mod derivations;
pub mod error;
pub mod http;
pub mod importers;
