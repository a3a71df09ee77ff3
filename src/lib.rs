pub mod backup;
pub mod cli;
pub mod connector;
pub mod engine;
pub mod mealie;
pub mod outcome;
pub mod progress;

include!(concat!(env!("OUT_DIR"), "/built.rs"));
