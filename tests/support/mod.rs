#![allow(dead_code)]

pub mod carbonflo_env;
pub mod scripted;
