pub mod power_service;
pub mod solar_algorithm;
