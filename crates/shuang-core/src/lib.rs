pub mod corpus;
pub mod scheme;
pub mod settings;
pub mod text;
pub mod unicode;
