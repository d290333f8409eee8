#![allow(dead_code)]

pub mod hits;
pub mod schedule;
