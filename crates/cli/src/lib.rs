//! Terminal front-end pieces for the `ddlaunch` binary.
pub mod logging;
pub mod terminal;
