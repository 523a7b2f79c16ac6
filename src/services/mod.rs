pub mod insights;
pub mod session;
pub mod validation;
pub mod warnings;
