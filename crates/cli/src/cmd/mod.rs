pub mod import;
pub mod inspect;
pub mod output;
pub mod scan;
