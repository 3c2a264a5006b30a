// Domain layer: schema, records and the ports the export side plugs into.

pub mod model;
pub mod ports;
pub mod schema;
