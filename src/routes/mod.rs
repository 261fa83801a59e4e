pub mod auth;

pub mod resources;

pub mod dashboard;

pub mod system;

pub mod pages;

pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use pages::configure_page_routes;
pub use resources::configure_resource_routes;
pub use system::configure_system_routes;
