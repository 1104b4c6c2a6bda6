//! Client for the Beanstalk REST API.
//!
//! Every call is authenticated with HTTP Basic credentials and exchanges
//! JSON. Status 401 and 500 are reported as distinct errors so callers can
//! point the user at the right fix.

pub mod client;
pub mod error;

pub use client::{BeanstalkClient, BeanstalkConnector};
pub use error::{ApiError, ApiResult};
