pub mod contact_handler;
pub mod page_handler;
pub mod quote_handler;
pub mod tools_handler;
