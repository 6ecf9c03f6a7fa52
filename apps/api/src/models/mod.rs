pub mod application;
pub mod deal_memo;
pub mod opportunity;
pub mod profile;
pub mod venue;
