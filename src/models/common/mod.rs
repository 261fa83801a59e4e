pub mod enums;
pub mod nullable;
pub mod pagination;
pub mod response;
pub mod validation;

pub use nullable::nullable;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
pub use validation::{FieldErrors, round_money};
