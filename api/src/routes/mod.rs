pub mod health_route;
pub mod justify;
pub mod required_columns_route;
