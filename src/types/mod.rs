pub mod pokemon;

pub use pokemon::PokemonDocument;
