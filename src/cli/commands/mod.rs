pub mod check;
pub mod decrypt;
pub mod invoke;
pub mod run;
pub mod sweep;
