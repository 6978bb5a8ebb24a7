pub mod accounts;

pub use accounts::{hash_password, verify_password, AccountHooks};
