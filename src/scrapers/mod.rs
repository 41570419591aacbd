pub mod base;
pub mod google;
pub mod invertia;
pub mod yahoo;
