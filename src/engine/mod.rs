//! Audio synthesis driver.
//!
//! Walks the clip catalog for one voice pack and asks the backend for every
//! clip that is not on disk yet.

mod generator;

pub use generator::{
    API_KEY_ENV, ClipGenerator, GenerateError, GenerateOptions, GenerateReport,
};
