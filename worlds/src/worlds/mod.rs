//! Example search spaces.

pub mod countdown;
pub mod dungeon;
pub mod road_trip;
