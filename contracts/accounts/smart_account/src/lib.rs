pub mod contract;
pub mod execution;
pub mod helpers;
pub mod state;
pub mod validation;
