//! External collaborators. Currently only the object-storage gateway.

pub mod s3_gateway;
