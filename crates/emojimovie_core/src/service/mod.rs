//! Use-case services over mapping storage.

pub mod mapping_service;
