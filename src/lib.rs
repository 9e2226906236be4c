pub mod corpus;
pub mod criteria;
pub mod engine;
pub mod errors;
pub mod information;
pub mod input;
pub mod output;
