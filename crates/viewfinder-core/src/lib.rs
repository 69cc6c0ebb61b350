pub mod consts;
pub mod error;
pub mod events;
pub mod filters;
pub mod gesture;
pub mod io;
pub mod listener;
pub mod options;
pub mod surface;
pub mod transform;
pub mod viewer;
