// Domain layer: entity models and the ports the store is written against.

pub mod model;
pub mod ports;
