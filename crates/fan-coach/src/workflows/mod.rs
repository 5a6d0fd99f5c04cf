pub mod fan_coach;
