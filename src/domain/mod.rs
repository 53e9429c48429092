// Domain layer: record models, matching and comparison rules, and the ports
// the adapters implement.

pub mod model;
pub mod ports;
pub mod services;
