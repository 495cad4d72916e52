// Pointer input handling
//
// The physics core only sees a `PointerState` snapshot per step. Projecting
// screen coordinates into the world is left to the windowing layer; the
// `PointerTracker` turns the resulting world positions into the velocity and
// movement flag the force fields need.

pub mod pointer;

pub use pointer::{PointerState, PointerTracker};
