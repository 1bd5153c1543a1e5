pub mod lesson;
pub mod member;
pub mod reservation;
pub mod sync;
