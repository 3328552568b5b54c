pub mod chat;
pub mod market;
pub mod trade;
pub mod response;

pub use chat::*;
pub use market::*;
pub use trade::*;
pub use response::*;
