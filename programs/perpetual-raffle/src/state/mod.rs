pub use config::*;
pub use raffle::*;
pub use request::*;
pub use vault::*;

pub mod config;
pub mod raffle;
pub mod request;
pub mod vault;
