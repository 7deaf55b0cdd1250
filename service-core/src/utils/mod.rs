pub mod token;

pub use token::constant_time_eq;
