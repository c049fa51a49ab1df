pub mod board;
pub mod goal_ops;
pub mod registry_ops;
pub mod renumber;
pub mod settings_ops;
pub mod tag_ops;
pub mod view;
