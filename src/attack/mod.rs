pub mod harness;
#[cfg(test)]
mod tests;

pub use harness::{forge, AttackKind};
