//! Scripts for deploying the membership & voting contracts and exporting
//! their addresses and ABIs to the frontend.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod client;
mod commands;
pub mod constants;
pub mod contract_info;
pub mod deploy;
pub mod errors;
mod solidity;
pub mod types;
pub mod utils;
