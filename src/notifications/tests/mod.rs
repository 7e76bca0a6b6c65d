//! Test modules for the notification channels

mod gate;
