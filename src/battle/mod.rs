pub mod ai;
pub mod calculators;
pub mod commands;
pub mod conditions;
pub mod end_of_turn;
pub mod engine;
pub mod move_effects;
pub mod state;
pub mod stats;
pub mod two_turn;

#[cfg(test)]
mod tests;
