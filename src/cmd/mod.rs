pub mod check;
pub mod sort;
pub mod view;
