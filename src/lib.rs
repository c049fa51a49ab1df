pub mod cli;
pub mod doc;
pub mod io;
pub mod model;
pub mod ops;
pub mod parse;
