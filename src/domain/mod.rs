// Domain layer: models and ports. Adapters implement the ports; core drives them.

pub mod model;
pub mod ports;
