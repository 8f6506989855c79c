// Domain layer: course models and the record-source port. No I/O here.

pub mod model;
pub mod ports;
