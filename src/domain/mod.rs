// Domain layer: request/result models and the configuration port.

pub mod model;
pub mod ports;
