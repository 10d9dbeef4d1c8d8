//! Application Module
//!
//! The session controller and the host interface it is driven through.

pub mod host;
pub mod session;

pub use host::{ConsoleHost, Host, Rendered};
pub use session::{ProcessReport, Session};
