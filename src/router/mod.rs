pub mod contact_router;
pub mod page_router;
pub mod quote_router;
pub mod tools_router;
