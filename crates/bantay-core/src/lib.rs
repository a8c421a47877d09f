//! Core Bantay client library (auth client, session storage, login flow, routing).

#![allow(async_fn_in_trait)]

pub mod auth;
pub mod config;
pub mod login;
pub mod router;
pub mod session;
