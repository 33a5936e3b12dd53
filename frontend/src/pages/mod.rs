pub mod case_opening;
pub mod home;
pub mod upgrade;
