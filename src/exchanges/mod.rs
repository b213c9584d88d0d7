pub mod bitget;
