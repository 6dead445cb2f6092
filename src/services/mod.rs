pub mod conversation;
pub mod dialogue;
pub mod name_policy;
pub mod parsers;
pub mod relay;
pub mod summary;
