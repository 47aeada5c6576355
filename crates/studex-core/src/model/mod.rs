pub mod student;

pub use student::{Gender, GenderSplit, StudentRecord};
