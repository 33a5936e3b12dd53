pub mod constants;
pub mod shared_case;
pub mod shared_upgrade;
