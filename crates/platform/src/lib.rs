//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Hashing primitives (SHA-256, hex encoding, constant-time compare)
//! - Password hashing and verification (Argon2id)
//! - Cookie building and extraction
//! - Host identity

pub mod cookie;
pub mod crypto;
pub mod host;
pub mod password;
