//! Typed clients for each iCheck resource.
//!
//! Every client borrows a [`Backend`](crate::backend::Backend) and maps its
//! parameter struct into request values; errors from the backend are passed
//! through unchanged.

pub mod account;
pub mod accountkit;
pub mod address;
pub mod location;
pub mod search;
pub mod user;

pub use account::{Account, LoginParams, LoginSocialParams, RegisterParams};
pub use accountkit::{
    AccountKit, AccountKitChangePhoneParams, AccountKitLoginParams, AccountKitResetPasswordParams,
    AccountKitResponse,
};
pub use address::{Address, AddressBody, Addresses};
pub use location::{Location, LocationListParams, Locations};
pub use search::{Search, SearchParams, SearchResponse};
pub use user::{AccessToken, User, UserList, UserListParams, Users};
