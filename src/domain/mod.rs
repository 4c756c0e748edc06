mod email_address;
mod inquiry;

pub use email_address::EmailAddress;
pub use inquiry::{Inquiry, InquiryForm, RequiredText, MESSAGE_PLACEHOLDER};
