pub mod justify_request;
pub mod justify_response;
pub mod justify_route;
