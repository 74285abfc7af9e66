pub mod controller;
pub mod credentials;
pub mod crud;
pub mod gate;
pub mod interface;
pub mod memory;
pub mod model;
pub mod otp;
pub mod password_reset;
pub mod routes;
pub mod schema;
pub mod super_admin;

pub use gate::{AdminSession, SuperAdminSession, Viewer};
pub use routes::auth_routes;
