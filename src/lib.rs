#![no_std]
#![doc = include_str!("../README.md")]

pub mod glissando;
pub mod harmonizer;
mod utils;
