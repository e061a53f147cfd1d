pub mod crypto;
pub mod multipart;
pub mod seed;
