pub mod check;
pub mod decode;
pub mod inspect;
pub mod plan;
