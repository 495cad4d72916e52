// Engine modules: physics, pointer input, fixed-step driver

pub mod game_loop;
pub mod input;
pub mod physics;
