pub mod goal;
pub mod schedule;
pub mod sip;
pub mod swp;
