pub mod class;
pub mod config;
pub mod extra;
pub mod profile;
pub mod resource;
pub mod student;

pub use class::*;
pub use config::*;
pub use extra::*;
pub use profile::*;
pub use resource::*;
pub use student::*;
