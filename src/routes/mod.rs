mod health_check;
mod send_email;

pub use health_check::health_check;
pub use send_email::{method_not_allowed, preflight, send_email, Acknowledgement, SendEmailError};
