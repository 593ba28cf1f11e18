pub mod api_response;
pub mod contact_dto;
pub mod location_dto;
pub mod page_dto;
pub mod quote_dto;
