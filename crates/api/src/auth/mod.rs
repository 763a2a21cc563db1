//! Authentication building blocks: JWT access tokens, refresh-token hashing,
//! and Argon2id password handling.

pub mod jwt;
pub mod password;
