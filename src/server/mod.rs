mod attendance;
pub mod dto;
pub mod response;
mod router;
mod sections;
mod students;
pub mod validation;

pub use router::{AppState, create_router};
