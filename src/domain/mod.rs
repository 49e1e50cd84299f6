// Domain layer: models and ports (interfaces) for the page the client drives.

pub mod model;
pub mod ports;
