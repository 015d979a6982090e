pub mod event;
pub mod machine;
pub mod scheduler;
pub mod state;
pub mod step;
pub mod store;
pub mod surface;
