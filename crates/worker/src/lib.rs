//! Background jobs run outside the request path.

pub mod review_analysis;
