// Domain layer: typed records, analysis results and the ports the engine runs against.

pub mod model;
pub mod ports;
pub mod report;
