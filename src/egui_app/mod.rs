//! Desktop front-end: controller, state, and egui rendering.

pub mod controller;
pub mod state;
pub mod ui;
