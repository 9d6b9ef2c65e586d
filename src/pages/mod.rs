//! Concrete page objects, one per screen under test

pub mod generic;
pub mod grc;
pub mod home;
pub mod login;

pub use generic::{GenericConfig, GenericPage};
pub use grc::{GrcConfig, GrcPage};
pub use home::{HomeConfig, HomePage};
pub use login::{Field, LoginConfig, LoginPage};
