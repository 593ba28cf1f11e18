pub mod state;
pub mod city;
pub mod dumpster_size;
pub mod service_type;
pub mod quote;
