pub mod checksum;
pub mod expiry;
pub mod mrz;

pub use checksum::CheckDigit;
pub use expiry::{ExpiryValidator, MrzDate};
pub use mrz::QuickMrzParser;
