// Core helpers shared by the engine

pub mod math;
