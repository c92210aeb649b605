pub mod controller;
pub mod effects;
pub mod error;
pub mod menu;
pub mod pagination;
pub mod view;
