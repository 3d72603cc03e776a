/// Shrinking-boundary wall compression
pub mod compression;
/// Flood-fill connectivity over mutual pipe stubs
pub mod connectivity;
/// Seeded level generation and certification
pub mod generator;
/// Breadth-first rotation solver, certification and hints
pub mod solver;
/// Compact rotation states for the solver
pub mod state;
