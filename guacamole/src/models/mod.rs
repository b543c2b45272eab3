//! Data models for the Guacamole metrics cycle.
//!
//! This module contains the credentials a collector is built with, the
//! transient token a cycle holds, and the samples a cycle produces.

pub mod credentials;
pub mod sample;
pub mod token;

pub use credentials::{Credentials, CredentialsValidationError};
pub use sample::{MetricKind, MetricName, MetricSample, MetricSink, NAMESPACE};
pub use token::{AuthToken, TokenGrant};
