// Adapters layer: concrete implementations for the outside world (registry,
// roster file, report files).

pub mod registry;
pub mod report;
pub mod roster;
