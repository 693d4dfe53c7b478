pub mod bear;
