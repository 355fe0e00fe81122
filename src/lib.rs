pub mod cli;
pub mod convert;
pub mod dump;
pub mod error;
pub mod model;
pub mod parsers;
pub mod split;
pub mod task;
pub mod writer;
