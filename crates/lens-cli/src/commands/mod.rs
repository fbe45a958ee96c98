pub mod chart;
pub mod dispatch;
pub mod schema;
pub mod shared;
pub mod table;
