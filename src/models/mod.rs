pub mod events;
pub mod health;
pub mod llm;
pub mod provider;
pub mod response;
pub mod shopify;
pub mod validation;
pub mod whatsapp;
