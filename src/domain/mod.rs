// Domain layer: graph model, diagnostics, ports and the pure pipeline stages. No I/O here.

pub mod diagnostics;
pub mod model;
pub mod ports;

pub mod services;
