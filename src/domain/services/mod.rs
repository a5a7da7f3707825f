//! Pure pipeline stages. Each takes its inputs by reference and returns new values.

pub mod colors;
pub mod layers;
pub mod parser;
pub mod paths;
pub mod resolver;
pub mod submodules;
pub mod violations;
