//! Every read and write of persisted state goes through these functions. Each one
//! takes the pool explicitly and holds a connection only for its own queries.

pub mod attendance;
pub mod employee;
pub mod statistics;
