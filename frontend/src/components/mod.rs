pub mod spin_button;

pub use spin_button::SpinButton;
