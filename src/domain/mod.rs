mod contact_submission;
mod notification_email;
mod submission_request;

pub use contact_submission::{ContactSubmission, InvalidSubmission};
pub use notification_email::NotificationEmail;
pub use submission_request::{SubmissionParseError, SubmissionRequest};
