//! # CareCamp Auth
//!
//! Token codec and session-cookie lifecycle for the CareCamp API.
//!
//! This crate provides:
//!
//! - [`claims`]: the identity claims carried by a session token
//! - [`jwt`]: token creation and verification over a shared secret
//! - [`cookie`]: the http-only session cookie that transports the token
//!
//! A session token identifies a principal by email, is signed with the
//! secret from [`carecamp_config::JwtConfig`], and is valid for the
//! configured window (30 days by default). It travels exclusively in an
//! http-only cookie named `token`.

pub mod claims;
pub mod cookie;
pub mod jwt;

// Re-export commonly used items at crate root
pub use claims::Claims;
pub use cookie::{TOKEN_COOKIE, removal_cookie, session_cookie};
pub use jwt::{create_token, verify_token};
