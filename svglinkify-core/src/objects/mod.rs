mod primitive;
mod raw_dictionary;

pub use primitive::ObjectId;
pub use raw_dictionary::RawDictionary;

// Type alias for compatibility
pub type ObjectReference = ObjectId;
