//! # Course Payment Server
//!
//! The REST layer over [`course_payment_engine`]. It hosts the public catalog, the purchase flow (order
//! initiation and payment verification), the learner's "my learning" view, instructor earnings, and the admin
//! back-office. Authentication is a bearer JWT shared with the identity provider; authorization always consults
//! the role stored on the learner profile, never the token's role claim.
pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
