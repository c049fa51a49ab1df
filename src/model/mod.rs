pub mod card;
pub mod config;
pub mod goal;
pub mod settings;
pub mod tag;

pub use card::*;
pub use config::*;
pub use goal::*;
pub use settings::*;
pub use tag::*;
