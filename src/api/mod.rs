//! REST API client module for the StudentHub backend.
//!
//! This module provides the `ApiClient` for communicating with the
//! portal backend: auth, student self-service, and admin management
//! resources. The backend uses JWT bearer token authentication obtained
//! through `/auth/login`.

pub mod admin;
pub mod client;
pub mod error;
pub mod student;

pub use client::{ApiClient, LoginResponse, LoginUser, MeResponse, MeUser, ServerAck};
pub use error::ApiError;
