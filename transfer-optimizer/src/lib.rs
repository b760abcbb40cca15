//! Transfer point optimization for transit paths.
//!
//! A router finds which trips get a passenger to their destination. This
//! library answers the follow-up question: "On these trips, where should I
//! change?"

pub mod domain;
pub mod optimizer;

#[cfg(test)]
mod test_support;
