pub mod crime_frame;
pub mod pollution_frame;
pub mod report;
pub mod weather_frame;
