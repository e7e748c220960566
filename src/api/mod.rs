//! API client module

pub mod account;
pub mod application;
pub mod client;
pub mod connector;
pub mod domain;
pub mod error;
pub mod function;
pub mod origin;
pub mod personal_token;
pub mod response;
pub mod storage;
pub mod workload;

pub use client::{AzionClient, Page};
