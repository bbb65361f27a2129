//! The state machine: actions, reducer, round resolution, aggregation,
//! and the `GameStateMachine` facade the presentation layer drives.

pub mod action;
pub mod aggregate;
pub mod machine;
pub mod reducer;
pub mod round;

pub use action::GameAction;
pub use aggregate::aggregate;
pub use machine::{GameStateMachine, SessionSnapshot};
pub use reducer::reduce;
pub use round::{decide, RoundOutcome};
