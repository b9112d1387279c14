//! Authentication module for the iCheck API.
//!
//! Every request carries HTTP Basic credentials identifying the calling
//! service. User-level calls additionally send an `access-token` header, set
//! per request through [`Params`](crate::types::Params).

mod credentials;

pub use credentials::{
    Credentials, CredentialsProvider, EnvCredentials, PASSWORD_VAR, StaticCredentials,
    USERNAME_VAR,
};
