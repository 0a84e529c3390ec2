pub mod poke_api;

pub use poke_api::{FetchOutcome, PokeApi, build_http_client};
