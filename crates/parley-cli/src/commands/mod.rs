//! Command implementations.

pub mod evaluate;
pub mod offers;
pub mod policy;

pub use self::evaluate::execute_evaluate;
pub use self::offers::execute_offers;
pub use self::policy::execute_policy;
