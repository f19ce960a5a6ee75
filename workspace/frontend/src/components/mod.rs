pub mod chart_modal;
pub mod charts;
pub mod current;
pub mod home;
pub mod layout;
