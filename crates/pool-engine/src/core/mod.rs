pub mod numeric;
pub mod roots;
pub mod timer;
pub mod ray;
pub mod time;
pub mod physics;
