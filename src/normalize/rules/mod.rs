// Individual per-dataset labeling rules
pub mod connection;
pub mod covtype;
pub mod creditcard;
pub mod shuttle;

// Re-export the rule types
pub use connection::ConnectionLabelRule;
pub use covtype::CoverTypeRule;
pub use creditcard::PassThroughRule;
pub use shuttle::ShuttleRule;
