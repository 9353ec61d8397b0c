/// Efficient bitset implementation for tile option and adjacency sets
pub mod bitset;
/// Single-hop neighbor constraint propagation
pub mod propagation;
/// Minimum-entropy cell selection and random choice
pub mod selection;
/// Tick driver owning the grid between iterations
pub mod stepper;
