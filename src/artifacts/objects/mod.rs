pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a full hexadecimal object ID (SHA-1)
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated object ID
pub const SHORT_OBJECT_ID_LENGTH: usize = 8;
