#![allow(dead_code, unused_imports)]

pub mod builders;
pub mod mock_classifier;
pub mod mock_store;
pub mod strategies;

pub use builders::*;
pub use mock_classifier::*;
pub use mock_store::*;
